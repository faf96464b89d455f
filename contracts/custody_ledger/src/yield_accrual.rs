//! Yield Accrual Engine
//!
//! Linear, non-compounding yield:
//!
//! ```text
//! pending = accumulated + floor(balance * rate_bps * elapsed / (SECONDS_PER_YEAR * 10_000))
//! ```
//!
//! An account with zero balance accrues nothing; its `accumulated_yield` is
//! kept as is. Every balance change settles the account first, so the
//! balance is constant over each accrual window and accrual restarts from
//! the moment a zero balance becomes positive again.

use ledger_errors::LedgerError;
use soroban_sdk::{Address, Env, I256};

use crate::fees::MAX_BPS;
use crate::ledger::bump_account_entry;
use crate::types::{DataKey, YieldAccount, YieldConfig};

/// 365 days.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

pub fn validate_yield_rate(rate_bps: u32) -> Result<(), LedgerError> {
    if rate_bps > MAX_BPS {
        return Err(LedgerError::YieldRateOutOfRange);
    }
    Ok(())
}

/// Yield earned by `balance` over `elapsed` seconds at `rate_bps`.
///
/// The product is taken in 256 bits, so only the quotient has to fit in
/// `i128`; a quotient beyond that saturates at `i128::MAX`.
pub fn accrue(e: &Env, balance: i128, rate_bps: u32, elapsed: u64) -> i128 {
    if balance <= 0 || rate_bps == 0 || elapsed == 0 {
        return 0;
    }
    let numerator = I256::from_i128(e, balance)
        .mul(&I256::from_i128(e, rate_bps as i128))
        .mul(&I256::from_i128(e, elapsed as i128));
    let denominator = I256::from_i128(e, SECONDS_PER_YEAR as i128 * MAX_BPS as i128);
    numerator.div(&denominator).to_i128().unwrap_or(i128::MAX)
}

pub fn load(e: &Env, account: &Address) -> Option<YieldAccount> {
    e.storage()
        .persistent()
        .get(&DataKey::YieldAccount(account.clone()))
}

fn save(e: &Env, account: &Address, record: &YieldAccount) {
    let key = DataKey::YieldAccount(account.clone());
    e.storage().persistent().set(&key, record);
    bump_account_entry(e, &key);
}

/// Settled plus accrued yield of `account` at `now`. Does not write.
///
/// Never fails, so settling can never block an exit.
pub fn pending_yield(
    e: &Env,
    cfg: &YieldConfig,
    account: &Address,
    balance: i128,
    now: u64,
) -> i128 {
    let record = load(e, account).unwrap_or_default();
    if balance == 0 {
        return record.accumulated_yield;
    }
    // Accounts funded before version 2 have no record and start at activation.
    let since = record.last_claim_timestamp.max(cfg.activated_at);
    let earned = accrue(e, balance, cfg.yield_rate_bps, now.saturating_sub(since));
    record.accumulated_yield.saturating_add(earned)
}

/// Moves accrued yield into `accumulated_yield` and restarts the window at
/// `now`. Must run before the account's balance changes.
pub fn checkpoint(
    e: &Env,
    cfg: &YieldConfig,
    account: &Address,
    balance: i128,
    now: u64,
) -> YieldAccount {
    let record = YieldAccount {
        last_claim_timestamp: now,
        accumulated_yield: pending_yield(e, cfg, account, balance, now),
    };
    save(e, account, &record);
    record
}

/// Checkpoints only once version 2 is active; a no-op before.
pub fn settle(
    e: &Env,
    cfg: Option<&YieldConfig>,
    account: &Address,
    balance: i128,
    now: u64,
) {
    if let Some(cfg) = cfg {
        checkpoint(e, cfg, account, balance, now);
    }
}

/// Zeroes the settled yield after a claim.
pub fn reset(e: &Env, account: &Address, now: u64) {
    save(
        e,
        account,
        &YieldAccount {
            last_claim_timestamp: now,
            accumulated_yield: 0,
        },
    );
}
