//! Delayed Withdrawal Requests
//!
//! Each account holds at most one request. The flow is:
//!   1. The holder calls `request_withdrawal`; any earlier request is
//!      replaced, never queued.
//!   2. Once `withdrawal_delay_seconds` have passed since the request, the
//!      holder calls `execute_withdrawal`. The balance is re-checked then.
//!   3. Before execution the holder may `cancel_withdrawal`, or leave at once
//!      with `emergency_withdraw`, which also clears the request.
//!
//! The delay is enforced by comparing timestamps when `execute_withdrawal`
//! runs; nothing is scheduled.

use ledger_errors::LedgerError;
use soroban_sdk::{Address, Env};

use crate::ledger::bump_account_entry;
use crate::types::{DataKey, PendingWithdrawal};

/// Longest configurable withdrawal delay (30 days).
pub const MAX_WITHDRAWAL_DELAY_SECS: u64 = 2_592_000;

pub fn validate_delay(delay_seconds: u64) -> Result<(), LedgerError> {
    if delay_seconds > MAX_WITHDRAWAL_DELAY_SECS {
        return Err(LedgerError::DelayOutOfRange);
    }
    Ok(())
}

/// Returns `true` once `delay` seconds have passed since `requested_at`.
#[must_use]
pub fn is_delay_elapsed(now: u64, requested_at: u64, delay: u64) -> bool {
    now >= requested_at.saturating_add(delay)
}

pub fn get(e: &Env, account: &Address) -> Option<PendingWithdrawal> {
    e.storage()
        .persistent()
        .get(&DataKey::PendingWithdrawal(account.clone()))
}

/// Stores a request, overwriting any previous one. `amount` must be > 0.
pub fn record(e: &Env, account: &Address, amount: i128, now: u64) -> PendingWithdrawal {
    let req = PendingWithdrawal {
        amount,
        requested_at: now,
    };
    let key = DataKey::PendingWithdrawal(account.clone());
    e.storage().persistent().set(&key, &req);
    bump_account_entry(e, &key);
    req
}

/// Removes the request, returning it if there was one.
pub fn clear(e: &Env, account: &Address) -> Option<PendingWithdrawal> {
    let key = DataKey::PendingWithdrawal(account.clone());
    let existing: Option<PendingWithdrawal> = e.storage().persistent().get(&key);
    if existing.is_some() {
        e.storage().persistent().remove(&key);
    }
    existing
}

/// The request that may execute at `now` against `balance`.
pub fn executable(
    e: &Env,
    account: &Address,
    balance: i128,
    delay: u64,
    now: u64,
) -> Result<PendingWithdrawal, LedgerError> {
    let req = get(e, account).ok_or(LedgerError::NoPendingRequest)?;
    if !is_delay_elapsed(now, req.requested_at, delay) {
        return Err(LedgerError::DelayNotElapsed);
    }
    if req.amount > balance {
        return Err(LedgerError::InsufficientBalance);
    }
    Ok(req)
}
