//! Deposit fee computation.
//!
//! `fee = floor(amount * fee_bps / 10_000)`, `net = amount - fee`, exact for
//! every `i128` amount. The rate is validated where it is set, not here.

use ledger_errors::LedgerError;

/// Basis-point denominator (10_000 bps = 100 %).
pub const MAX_BPS: u32 = 10_000;

/// Rejects fee rates above 100 %.
pub fn validate_fee_bps(fee_bps: u32) -> Result<(), LedgerError> {
    if fee_bps > MAX_BPS {
        return Err(LedgerError::FeeOutOfRange);
    }
    Ok(())
}

/// Split a gross amount into `(fee, net)`.
///
/// `amount` is split at the denominator so that no intermediate product
/// exceeds `amount`: `floor(amount * bps / 10_000)` equals
/// `(amount / 10_000) * bps + (amount % 10_000) * bps / 10_000` exactly for
/// `amount >= 0`. Holds for any `i128` amount when `fee_bps <= MAX_BPS`.
#[inline]
pub fn compute_fee(amount: i128, fee_bps: u32) -> Result<(i128, i128), LedgerError> {
    let bps = fee_bps as i128;
    let denom = MAX_BPS as i128;
    let fee = (amount / denom)
        .checked_mul(bps)
        .and_then(|whole| whole.checked_add((amount % denom) * bps / denom))
        .ok_or(LedgerError::Overflow)?;
    Ok((fee, amount - fee))
}
