use soroban_sdk::{Address, BytesN, Env, Symbol};

use crate::types::Right;

/// Emitted once by the version-1 initializer.
///
/// # Topics
/// * `Symbol` - "initialized"
/// * `Address` - The admin principal
///
/// # Data
/// * `Address` - The asset contract
/// * `u32` - The deposit fee in basis points
pub fn emit_initialized(e: &Env, admin: &Address, asset: &Address, deposit_fee_bps: u32) {
    let topics = (Symbol::new(e, "initialized"), admin.clone());
    e.events().publish(topics, (asset.clone(), deposit_fee_bps));
}

/// Emitted when a version-N initializer commits.
///
/// # Data
/// * `u32` - The previous schema version
/// * `u32` - The new schema version
pub fn emit_version_initialized(e: &Env, caller: &Address, from: u32, to: u32) {
    let topics = (Symbol::new(e, "version_initialized"), caller.clone());
    e.events().publish(topics, (from, to));
}

/// Emitted just before the running code is replaced.
pub fn emit_upgraded(e: &Env, caller: &Address, wasm_hash: &BytesN<32>, schema_version: u32) {
    let topics = (Symbol::new(e, "upgraded"), caller.clone());
    e.events()
        .publish(topics, (wasm_hash.clone(), schema_version));
}

/// Emitted on every deposit.
///
/// # Topics
/// * `Symbol` - "deposit"
/// * `Address` - The depositing account
///
/// # Data
/// * `i128` - Net amount credited
/// * `i128` - Fee retained
pub fn emit_deposit(e: &Env, account: &Address, net: i128, fee: i128) {
    let topics = (Symbol::new(e, "deposit"), account.clone());
    e.events().publish(topics, (net, fee));
}

/// Emitted on an immediate withdrawal.
///
/// # Data
/// * `i128` - Amount withdrawn
/// * `i128` - Remaining balance
pub fn emit_withdraw(e: &Env, account: &Address, amount: i128, remaining: i128) {
    let topics = (Symbol::new(e, "withdraw"), account.clone());
    e.events().publish(topics, (amount, remaining));
}

pub fn emit_yield_claimed(e: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(e, "yield_claimed"), account.clone());
    e.events().publish(topics, amount);
}

/// Emitted when a delayed withdrawal is requested.
///
/// # Data
/// * `i128` - Requested amount
/// * `u64` - Request timestamp
/// * `bool` - Whether an earlier request was replaced
pub fn emit_withdrawal_requested(
    e: &Env,
    account: &Address,
    amount: i128,
    requested_at: u64,
    replaced: bool,
) {
    let topics = (Symbol::new(e, "withdrawal_requested"), account.clone());
    e.events().publish(topics, (amount, requested_at, replaced));
}

pub fn emit_withdrawal_executed(e: &Env, account: &Address, amount: i128, remaining: i128) {
    let topics = (Symbol::new(e, "withdrawal_executed"), account.clone());
    e.events().publish(topics, (amount, remaining));
}

pub fn emit_withdrawal_cancelled(e: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(e, "withdrawal_cancelled"), account.clone());
    e.events().publish(topics, amount);
}

/// Emitted on an emergency exit.
///
/// # Data
/// * `i128` - Full balance withdrawn
/// * `bool` - Whether a pending request was cleared
pub fn emit_emergency_withdrawal(e: &Env, account: &Address, amount: i128, cleared: bool) {
    let topics = (Symbol::new(e, "emergency_withdrawal"), account.clone());
    e.events().publish(topics, (amount, cleared));
}

/// Emitted when a bounded parameter changes.
///
/// # Topics
/// * `Symbol` - the parameter event name, e.g. "fee_updated"
///
/// # Data
/// * `u64` - Old value
/// * `u64` - New value
pub fn emit_parameter_updated(e: &Env, name: &str, caller: &Address, old: u64, new: u64) {
    let topics = (Symbol::new(e, name), caller.clone());
    e.events().publish(topics, (old, new));
}

pub fn emit_deposits_paused(e: &Env, caller: &Address, paused: bool) {
    let topics = (Symbol::new(e, "deposits_paused"), caller.clone());
    e.events().publish(topics, paused);
}

pub fn emit_fees_collected(e: &Env, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "fees_collected"), recipient.clone());
    e.events().publish(topics, amount);
}

pub fn emit_right_changed(e: &Env, principal: &Address, right: Right, granted: bool) {
    let name = if granted {
        "right_granted"
    } else {
        "right_revoked"
    };
    let topics = (Symbol::new(e, name), principal.clone());
    e.events().publish(topics, right);
}
