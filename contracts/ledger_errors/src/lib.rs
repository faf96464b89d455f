#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups ledger errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `LedgerError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Initialization and schema-version errors (codes 1-99).
    Schema,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Out-of-range parameters and amounts (codes 200-299).
    Validation,
    /// Account balance and yield errors (codes 300-399).
    Ledger,
    /// Delayed-withdrawal request errors (codes 400-499).
    Withdrawal,
    /// Failures reported by an external collaborator (codes 500-599).
    External,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  LedgerError
/// @notice Every failure the custody ledger can surface to a caller.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Schema / initialization
///   100 - 199 : Authorization
///   200 - 299 : Validation
///   300 - 399 : Ledger
///   400 - 499 : Withdrawal requests
///   500 - 599 : External collaborators
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum LedgerError {
    // --- Schema (1-99) ---
    /// The version-1 initializer has not run on this instance.
    NotInitialized = 1,

    /// The version-1 initializer has already run.
    AlreadyInitialized = 2,

    /// The requested version's initializer has already run (or a later one has).
    VersionAlreadyInitialized = 3,

    /// The requested version's predecessor has not been initialized yet.
    VersionSequenceViolation = 4,

    /// The operation belongs to a schema version this instance has not reached.
    VersionNotActive = 5,

    // --- Authorization (100-199) ---
    /// Caller does not hold the right required by the operation.
    Unauthorized = 100,

    // --- Validation (200-299) ---
    /// Amount argument must be strictly positive.
    InvalidAmount = 200,

    /// Deposit fee must be within 0-10000 bps.
    FeeOutOfRange = 201,

    /// Yield rate must be within 0-10000 bps.
    YieldRateOutOfRange = 202,

    /// Withdrawal delay must be within 0-2592000 seconds.
    DelayOutOfRange = 203,

    // --- Ledger (300-399) ---
    /// Requested amount exceeds the account balance.
    InsufficientBalance = 300,

    /// Deposits are paused.
    DepositsPaused = 301,

    /// Account has no balance to withdraw.
    NoBalance = 302,

    /// Yield cannot be claimed by an account with zero balance.
    NoYieldBasis = 303,

    /// No retained deposit fees are available to collect.
    NoFeesToCollect = 304,

    // --- Withdrawal (400-499) ---
    /// Account has no pending withdrawal request.
    NoPendingRequest = 400,

    /// The withdrawal delay has not elapsed since the request.
    DelayNotElapsed = 401,

    // --- External (500-599) ---
    /// The asset-transfer collaborator did not report success.
    TransferFailed = 500,

    // --- Arithmetic (700-799) ---
    /// Integer overflow in a checked arithmetic operation.
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every LedgerError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for LedgerError {
    fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::NotInitialized
            | LedgerError::AlreadyInitialized
            | LedgerError::VersionAlreadyInitialized
            | LedgerError::VersionSequenceViolation
            | LedgerError::VersionNotActive => ErrorCategory::Schema,

            LedgerError::Unauthorized => ErrorCategory::Authorization,

            LedgerError::InvalidAmount
            | LedgerError::FeeOutOfRange
            | LedgerError::YieldRateOutOfRange
            | LedgerError::DelayOutOfRange => ErrorCategory::Validation,

            LedgerError::InsufficientBalance
            | LedgerError::DepositsPaused
            | LedgerError::NoBalance
            | LedgerError::NoYieldBasis
            | LedgerError::NoFeesToCollect => ErrorCategory::Ledger,

            LedgerError::NoPendingRequest | LedgerError::DelayNotElapsed => {
                ErrorCategory::Withdrawal
            }

            LedgerError::TransferFailed => ErrorCategory::External,

            LedgerError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            LedgerError::NotInitialized => "Ledger has not been initialized",
            LedgerError::AlreadyInitialized => "Ledger has already been initialized",
            LedgerError::VersionAlreadyInitialized => {
                "Schema version has already been initialized"
            }
            LedgerError::VersionSequenceViolation => {
                "Previous schema version has not been initialized"
            }
            LedgerError::VersionNotActive => "Operation requires a later schema version",
            LedgerError::Unauthorized => "Caller lacks the required right",
            LedgerError::InvalidAmount => "Amount must be strictly positive (> 0)",
            LedgerError::FeeOutOfRange => "Deposit fee bps must be in range 0-10000",
            LedgerError::YieldRateOutOfRange => "Yield rate bps must be in range 0-10000",
            LedgerError::DelayOutOfRange => "Withdrawal delay must be at most 30 days",
            LedgerError::InsufficientBalance => "Insufficient balance for withdrawal",
            LedgerError::DepositsPaused => "Deposits are paused",
            LedgerError::NoBalance => "Account has no balance",
            LedgerError::NoYieldBasis => "Account has no balance to earn yield on",
            LedgerError::NoFeesToCollect => "No deposit fees to collect",
            LedgerError::NoPendingRequest => "No pending withdrawal request",
            LedgerError::DelayNotElapsed => "Withdrawal delay has not elapsed",
            LedgerError::TransferFailed => "Asset transfer failed",
            LedgerError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
