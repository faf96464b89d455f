//! Account Ledger
//!
//! Per-account balances and the ledger-wide aggregates. `credit` and `debit`
//! are the only writers of a balance and always move `total_deposited` by the
//! same amount, so `total_deposited` equals the sum of all balances after
//! every operation.

use ledger_errors::LedgerError;
use soroban_sdk::{Address, Env};

use crate::types::{AccountBalance, DataKey, LedgerTotals};

/// Remaining TTL (in ledgers) below which an entry is bumped (~1 day at 5 s/ledger).
pub const BUMP_THRESHOLD: u32 = 17_280;
/// TTL an entry is bumped to (~30 days).
pub const BUMP_TARGET: u32 = 518_400;

/// Keeps a per-account entry live; called after every write to it.
pub fn bump_account_entry(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn balance_of(e: &Env, account: &Address) -> i128 {
    e.storage()
        .persistent()
        .get::<_, AccountBalance>(&DataKey::Balance(account.clone()))
        .map(|a| a.balance)
        .unwrap_or(0)
}

pub fn totals(e: &Env) -> LedgerTotals {
    e.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_default()
}

fn save_totals(e: &Env, totals: &LedgerTotals) {
    let storage = e.storage().instance();
    storage.set(&DataKey::Totals, totals);
    storage.extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn save_balance(e: &Env, account: &Address, balance: i128) {
    let key = DataKey::Balance(account.clone());
    e.storage()
        .persistent()
        .set(&key, &AccountBalance { balance });
    bump_account_entry(e, &key);
}

/// Adds `amount` to the account and the aggregate. Returns the new balance.
pub fn credit(e: &Env, account: &Address, amount: i128) -> Result<i128, LedgerError> {
    let balance = balance_of(e, account)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    let mut t = totals(e);
    t.total_deposited = t
        .total_deposited
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    save_balance(e, account, balance);
    save_totals(e, &t);
    Ok(balance)
}

/// Removes `amount` from the account and the aggregate. Returns the new
/// balance.
pub fn debit(e: &Env, account: &Address, amount: i128) -> Result<i128, LedgerError> {
    let current = balance_of(e, account);
    if amount > current {
        return Err(LedgerError::InsufficientBalance);
    }
    let balance = current - amount;
    let mut t = totals(e);
    t.total_deposited -= amount;

    save_balance(e, account, balance);
    save_totals(e, &t);
    Ok(balance)
}

/// Retains a deposit fee in the contract.
pub fn retain_fee(e: &Env, fee: i128) -> Result<(), LedgerError> {
    if fee == 0 {
        return Ok(());
    }
    let mut t = totals(e);
    t.accrued_fees = t
        .accrued_fees
        .checked_add(fee)
        .ok_or(LedgerError::Overflow)?;
    save_totals(e, &t);
    Ok(())
}

/// Clears the retained fees and returns what was held.
pub fn take_fees(e: &Env) -> i128 {
    let mut t = totals(e);
    let fees = t.accrued_fees;
    t.accrued_fees = 0;
    save_totals(e, &t);
    fees
}
