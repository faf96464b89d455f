//! Asset-transfer boundary.
//!
//! Funds move through the configured asset contract's token interface. Any
//! failure of the external call, whether an error result or a trap inside
//! the asset contract, is reported as `TransferFailed`; partial transfers are
//! not assumed possible.

use ledger_errors::LedgerError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

/// Pulls `amount` from `from` into the ledger contract. Requires a prior
/// allowance for the contract as spender.
pub fn pull(e: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, asset).try_transfer_from(&contract, from, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(LedgerError::TransferFailed),
    }
}

/// Pushes `amount` from the ledger contract to `to`.
pub fn push(e: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    match TokenClient::new(e, asset).try_transfer(&contract, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(LedgerError::TransferFailed),
    }
}
