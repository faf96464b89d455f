//! Rights held by principals. Every gated mutation calls [`require_right`]
//! before touching state.

use ledger_errors::LedgerError;
use soroban_sdk::{Address, Env};

use crate::types::{DataKey, Right};

pub fn has_right(e: &Env, principal: &Address, right: Right) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Right(principal.clone(), right))
        .unwrap_or(false)
}

/// Requires `principal` to authorize the call and to hold `right`.
pub fn require_right(e: &Env, principal: &Address, right: Right) -> Result<(), LedgerError> {
    principal.require_auth();
    if !has_right(e, principal, right) {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

pub fn grant(e: &Env, principal: &Address, right: Right) {
    e.storage()
        .instance()
        .set(&DataKey::Right(principal.clone(), right), &true);
}

pub fn revoke(e: &Env, principal: &Address, right: Right) {
    e.storage()
        .instance()
        .remove(&DataKey::Right(principal.clone(), right));
}
