//! Custody Ledger Contract
//!
//! Holds one balance per account in a single asset, charges a deposit fee,
//! accrues linear yield and supports delayed withdrawals. The contract code
//! can be replaced in place; already persisted balances and counters are
//! never rewritten by a version change.
//!
//! ## Schema versions
//!
//! | version | adds                                                        |
//! |---------|-------------------------------------------------------------|
//! | 1       | asset, admin, deposit fee, balances, `total_deposited`      |
//! | 2       | yield rate, deposit pause, per-account yield bookkeeping    |
//! | 3       | withdrawal delay, per-account pending withdrawal request    |
//!
//! ## Key design decisions
//!
//! - **Append-only layout**: each version adds new records under new keys;
//!   see [`schema`].
//! - **Atomic operations**: every entry point runs as one invocation. An
//!   `Err` result discards all writes of that invocation, including a balance
//!   decrement made before a failed transfer-out.
//! - **Checks-Effects-Interactions**: balances and bookkeeping are updated
//!   before the asset contract is called.
//! - **Single-slot requests**: a new withdrawal request replaces the old one.
//! - **Unconditional exit**: `emergency_withdraw` needs nothing but the
//!   account's own authorization.

#![no_std]

mod access_control;
mod asset;
mod events;
mod fees;
mod ledger;
pub mod schema;
pub mod types;
mod withdrawal;
mod yield_accrual;

pub use fees::{compute_fee, MAX_BPS};
pub use ledger_errors::LedgerError;
pub use types::{
    CoreConfig, DelayConfig, LayoutEntry, PendingWithdrawal, Right, YieldAccount, YieldConfig,
};
pub use withdrawal::MAX_WITHDRAWAL_DELAY_SECS;
pub use yield_accrual::SECONDS_PER_YEAR;

use schema::{LedgerState, V2, V3};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};


#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_deposit;

#[contract]
pub struct CustodyLedger;

#[contractimpl]
impl CustodyLedger {
    // ── Schema versions ────────────────────────────────────────────────────

    /// Version-1 initializer. Stores the asset, the admin and the deposit fee
    /// and grants the admin `Admin` and `Upgrade`.
    pub fn initialize(
        e: Env,
        admin: Address,
        asset: Address,
        deposit_fee_bps: u32,
    ) -> Result<(), LedgerError> {
        schema::initialize_v1(&e, &admin, &asset, deposit_fee_bps)
    }

    /// Version-2 initializer: sets the yield rate, starts with deposits
    /// unpaused and grants the admin principal `Pause`.
    pub fn initialize_v2(e: Env, caller: Address, yield_rate_bps: u32) -> Result<(), LedgerError> {
        schema::run_initializer(&e, &caller, V2, |state| {
            yield_accrual::validate_yield_rate(yield_rate_bps)?;
            schema::save_yield_config(
                &e,
                &types::YieldConfig {
                    yield_rate_bps,
                    deposits_paused: false,
                    activated_at: e.ledger().timestamp(),
                },
            );
            access_control::grant(&e, &state.core.admin, Right::Pause);
            Ok(())
        })
    }

    /// Version-3 initializer: sets the withdrawal delay.
    pub fn initialize_v3(
        e: Env,
        caller: Address,
        withdrawal_delay_seconds: u64,
    ) -> Result<(), LedgerError> {
        schema::run_initializer(&e, &caller, V3, |_| {
            withdrawal::validate_delay(withdrawal_delay_seconds)?;
            schema::save_delay_config(
                &e,
                &types::DelayConfig {
                    withdrawal_delay_seconds,
                },
            );
            Ok(())
        })
    }

    /// Replace the running code. Requires `Upgrade`; persisted records are
    /// left untouched.
    pub fn upgrade(e: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), LedgerError> {
        let state = LedgerState::load(&e)?;
        access_control::require_right(&e, &caller, Right::Upgrade)?;
        events::emit_upgraded(&e, &caller, &new_wasm_hash, state.version);
        e.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ── Account ledger ─────────────────────────────────────────────────────

    /// Deposit `amount` of the asset. The fee is retained by the contract and
    /// the net amount is credited. Returns the net amount.
    pub fn deposit(e: Env, caller: Address, amount: i128) -> Result<i128, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if state.yield_config.as_ref().is_some_and(|c| c.deposits_paused) {
            return Err(LedgerError::DepositsPaused);
        }

        asset::pull(&e, &state.core.asset, &caller, amount)?;

        let (fee, net) = fees::compute_fee(amount, state.core.deposit_fee_bps)?;
        let balance = ledger::balance_of(&e, &caller);
        let now = e.ledger().timestamp();
        yield_accrual::settle(&e, state.yield_config.as_ref(), &caller, balance, now);
        ledger::credit(&e, &caller, net)?;
        ledger::retain_fee(&e, fee)?;

        events::emit_deposit(&e, &caller, net, fee);
        Ok(net)
    }

    /// Withdraw `amount` at once, bypassing any withdrawal delay. Does not
    /// read or clear a pending request. Returns the remaining balance.
    pub fn withdraw(e: Env, caller: Address, amount: i128) -> Result<i128, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = ledger::balance_of(&e, &caller);
        if amount > balance {
            return Err(LedgerError::InsufficientBalance);
        }

        let now = e.ledger().timestamp();
        yield_accrual::settle(&e, state.yield_config.as_ref(), &caller, balance, now);
        // CEI: debit before transfer.
        let remaining = ledger::debit(&e, &caller, amount)?;
        asset::push(&e, &state.core.asset, &caller, amount)?;

        events::emit_withdraw(&e, &caller, amount, remaining);
        Ok(remaining)
    }

    // ── Yield ──────────────────────────────────────────────────────────────

    /// Pay out the caller's settled and accrued yield. Returns the amount.
    pub fn claim_yield(e: Env, caller: Address) -> Result<i128, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        let cfg = state.yield_config()?;
        let balance = ledger::balance_of(&e, &caller);
        if balance == 0 {
            return Err(LedgerError::NoYieldBasis);
        }

        let now = e.ledger().timestamp();
        let amount = yield_accrual::pending_yield(&e, cfg, &caller, balance, now);
        // CEI: reset bookkeeping before transfer.
        yield_accrual::reset(&e, &caller, now);
        asset::push(&e, &state.core.asset, &caller, amount)?;

        events::emit_yield_claimed(&e, &caller, amount);
        Ok(amount)
    }

    /// Yield `account` could claim right now.
    pub fn pending_yield(e: Env, account: Address) -> Result<i128, LedgerError> {
        let state = LedgerState::load(&e)?;
        let cfg = state.yield_config()?;
        let balance = ledger::balance_of(&e, &account);
        Ok(yield_accrual::pending_yield(
            &e,
            cfg,
            &account,
            balance,
            e.ledger().timestamp(),
        ))
    }

    // ── Delayed withdrawals ────────────────────────────────────────────────

    /// Request a delayed withdrawal of `amount`, replacing any earlier request.
    pub fn request_withdrawal(
        e: Env,
        caller: Address,
        amount: i128,
    ) -> Result<PendingWithdrawal, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        state.delay_config()?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > ledger::balance_of(&e, &caller) {
            return Err(LedgerError::InsufficientBalance);
        }

        let now = e.ledger().timestamp();
        let replaced = withdrawal::get(&e, &caller).is_some();
        let req = withdrawal::record(&e, &caller, amount, now);

        events::emit_withdrawal_requested(&e, &caller, amount, now, replaced);
        Ok(req)
    }

    /// Execute the caller's pending request once the delay has elapsed.
    /// Returns the amount transferred.
    pub fn execute_withdrawal(e: Env, caller: Address) -> Result<i128, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        let delay = state.delay_config()?.withdrawal_delay_seconds;
        let balance = ledger::balance_of(&e, &caller);
        let now = e.ledger().timestamp();
        let req = withdrawal::executable(&e, &caller, balance, delay, now)?;

        yield_accrual::settle(&e, state.yield_config.as_ref(), &caller, balance, now);
        // CEI: clear request and debit before transfer.
        withdrawal::clear(&e, &caller);
        let remaining = ledger::debit(&e, &caller, req.amount)?;
        asset::push(&e, &state.core.asset, &caller, req.amount)?;

        events::emit_withdrawal_executed(&e, &caller, req.amount, remaining);
        Ok(req.amount)
    }

    /// Drop the caller's pending request.
    pub fn cancel_withdrawal(e: Env, caller: Address) -> Result<(), LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        state.delay_config()?;
        let req = withdrawal::clear(&e, &caller).ok_or(LedgerError::NoPendingRequest)?;
        events::emit_withdrawal_cancelled(&e, &caller, req.amount);
        Ok(())
    }

    /// Withdraw the caller's entire balance now, ignoring the delay and
    /// clearing any pending request. Returns the amount transferred.
    pub fn emergency_withdraw(e: Env, caller: Address) -> Result<i128, LedgerError> {
        caller.require_auth();
        let state = LedgerState::load(&e)?;
        state.delay_config()?;
        let balance = ledger::balance_of(&e, &caller);
        if balance == 0 {
            return Err(LedgerError::NoBalance);
        }

        let now = e.ledger().timestamp();
        yield_accrual::settle(&e, state.yield_config.as_ref(), &caller, balance, now);
        // CEI: clear request and debit before transfer.
        let cleared = withdrawal::clear(&e, &caller).is_some();
        ledger::debit(&e, &caller, balance)?;
        asset::push(&e, &state.core.asset, &caller, balance)?;

        events::emit_emergency_withdrawal(&e, &caller, balance, cleared);
        Ok(balance)
    }

    // ── Administration ─────────────────────────────────────────────────────

    /// Set the deposit fee (`Admin`, 0-10000 bps).
    pub fn set_deposit_fee(e: Env, caller: Address, fee_bps: u32) -> Result<(), LedgerError> {
        let mut state = LedgerState::load(&e)?;
        access_control::require_right(&e, &caller, Right::Admin)?;
        fees::validate_fee_bps(fee_bps)?;

        let old = state.core.deposit_fee_bps;
        state.core.deposit_fee_bps = fee_bps;
        schema::save_core(&e, &state.core);
        events::emit_parameter_updated(&e, "fee_updated", &caller, old as u64, fee_bps as u64);
        Ok(())
    }

    /// Set the annual yield rate (`Admin`, version 2, 0-10000 bps). Takes
    /// effect for every account's open accrual window.
    pub fn set_yield_rate(e: Env, caller: Address, rate_bps: u32) -> Result<(), LedgerError> {
        let state = LedgerState::load(&e)?;
        let mut cfg = state.yield_config()?.clone();
        access_control::require_right(&e, &caller, Right::Admin)?;
        yield_accrual::validate_yield_rate(rate_bps)?;

        let old = cfg.yield_rate_bps;
        cfg.yield_rate_bps = rate_bps;
        schema::save_yield_config(&e, &cfg);
        events::emit_parameter_updated(
            &e,
            "yield_rate_updated",
            &caller,
            old as u64,
            rate_bps as u64,
        );
        Ok(())
    }

    /// Pause or resume deposits (`Pause`, version 2). Exits stay open.
    pub fn set_deposits_paused(e: Env, caller: Address, paused: bool) -> Result<(), LedgerError> {
        let state = LedgerState::load(&e)?;
        let mut cfg = state.yield_config()?.clone();
        access_control::require_right(&e, &caller, Right::Pause)?;

        cfg.deposits_paused = paused;
        schema::save_yield_config(&e, &cfg);
        events::emit_deposits_paused(&e, &caller, paused);
        Ok(())
    }

    /// Set the withdrawal delay (`Admin`, version 3, at most 30 days).
    pub fn set_withdrawal_delay(
        e: Env,
        caller: Address,
        delay_seconds: u64,
    ) -> Result<(), LedgerError> {
        let state = LedgerState::load(&e)?;
        let mut cfg = state.delay_config()?.clone();
        access_control::require_right(&e, &caller, Right::Admin)?;
        withdrawal::validate_delay(delay_seconds)?;

        let old = cfg.withdrawal_delay_seconds;
        cfg.withdrawal_delay_seconds = delay_seconds;
        schema::save_delay_config(&e, &cfg);
        events::emit_parameter_updated(&e, "delay_updated", &caller, old, delay_seconds);
        Ok(())
    }

    pub fn grant_right(
        e: Env,
        caller: Address,
        principal: Address,
        right: Right,
    ) -> Result<(), LedgerError> {
        LedgerState::load(&e)?;
        access_control::require_right(&e, &caller, Right::Admin)?;
        access_control::grant(&e, &principal, right);
        events::emit_right_changed(&e, &principal, right, true);
        Ok(())
    }

    pub fn revoke_right(
        e: Env,
        caller: Address,
        principal: Address,
        right: Right,
    ) -> Result<(), LedgerError> {
        LedgerState::load(&e)?;
        access_control::require_right(&e, &caller, Right::Admin)?;
        access_control::revoke(&e, &principal, right);
        events::emit_right_changed(&e, &principal, right, false);
        Ok(())
    }

    /// Sweep retained deposit fees to `recipient` (`Admin`). Returns the
    /// amount swept.
    pub fn collect_fees(e: Env, caller: Address, recipient: Address) -> Result<i128, LedgerError> {
        let state = LedgerState::load(&e)?;
        access_control::require_right(&e, &caller, Right::Admin)?;

        // CEI: clear bookkeeping before transfer.
        let fees = ledger::take_fees(&e);
        if fees == 0 {
            return Err(LedgerError::NoFeesToCollect);
        }
        asset::push(&e, &state.core.asset, &recipient, fees)?;

        events::emit_fees_collected(&e, &recipient, fees);
        Ok(fees)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn schema_version(e: Env) -> u32 {
        schema::schema_version(&e)
    }

    pub fn is_version_initialized(e: Env, version: u32) -> bool {
        schema::is_version_initialized(&e, version)
    }

    /// The version-1 configuration block.
    pub fn get_config(e: Env) -> Result<CoreConfig, LedgerError> {
        Ok(LedgerState::load(&e)?.core)
    }

    /// The version-2 block; `None` until version 2 is initialized.
    pub fn get_yield_config(e: Env) -> Option<YieldConfig> {
        LedgerState::load(&e).ok().and_then(|s| s.yield_config)
    }

    /// The version-3 block; `None` until version 3 is initialized.
    pub fn get_delay_config(e: Env) -> Option<DelayConfig> {
        LedgerState::load(&e).ok().and_then(|s| s.delay_config)
    }

    pub fn layout_manifest(e: Env) -> Vec<LayoutEntry> {
        schema::layout_manifest(&e)
    }

    pub fn has_right(e: Env, principal: Address, right: Right) -> bool {
        access_control::has_right(&e, &principal, right)
    }

    pub fn balance_of(e: Env, account: Address) -> i128 {
        ledger::balance_of(&e, &account)
    }

    pub fn total_deposited(e: Env) -> i128 {
        ledger::totals(&e).total_deposited
    }

    pub fn accrued_fees(e: Env) -> i128 {
        ledger::totals(&e).accrued_fees
    }

    pub fn get_pending_withdrawal(e: Env, account: Address) -> Option<PendingWithdrawal> {
        withdrawal::get(&e, &account)
    }

    /// Yield bookkeeping of `account`; `None` until its first settlement.
    pub fn get_yield_account(e: Env, account: Address) -> Option<YieldAccount> {
        yield_accrual::load(&e, &account)
    }
}
