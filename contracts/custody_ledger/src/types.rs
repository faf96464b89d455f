use soroban_sdk::{contracttype, Address, Symbol};

// ─── Version 1 records ─────────────────────────────────────────────────────

/// Ledger-wide configuration written once by the version-1 initializer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreConfig {
    /// Asset contract that funds move through.
    pub asset: Address,
    /// Principal holding elevated rights from version 1 onwards.
    pub admin: Address,
    /// Deposit fee in basis points (100 bps = 1 %).
    pub deposit_fee_bps: u32,
}

/// Aggregates maintained alongside every balance mutation.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerTotals {
    /// Sum of every account balance.
    pub total_deposited: i128,
    /// Deposit fees retained by the contract, outside `total_deposited`.
    pub accrued_fees: i128,
}

/// Per-account principal.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountBalance {
    pub balance: i128,
}

// ─── Version 2 records ─────────────────────────────────────────────────────

/// Yield and pause settings introduced by version 2.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldConfig {
    /// Annual linear yield in basis points.
    pub yield_rate_bps: u32,
    /// When true, deposits are rejected; every exit path stays open.
    pub deposits_paused: bool,
    /// Ledger timestamp at which version 2 was initialized. Accounts funded
    /// earlier start accruing from here.
    pub activated_at: u64,
}

/// Per-account yield bookkeeping.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct YieldAccount {
    /// Last settlement time; 0 means the account was never settled.
    pub last_claim_timestamp: u64,
    /// Yield settled but not yet paid out.
    pub accumulated_yield: i128,
}

// ─── Version 3 records ─────────────────────────────────────────────────────

/// Withdrawal-delay settings introduced by version 3.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayConfig {
    pub withdrawal_delay_seconds: u64,
}

/// The single outstanding delayed-withdrawal request of an account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingWithdrawal {
    /// Requested amount, always > 0.
    pub amount: i128,
    /// Ledger timestamp of the request.
    pub requested_at: u64,
}

// ─── Rights ────────────────────────────────────────────────────────────────

/// Rights checked before gated mutations.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Right {
    /// Parameter changes, right management, fee collection.
    Admin,
    /// Version initializers and code upgrades.
    Upgrade,
    /// Pausing and unpausing deposits.
    Pause,
}

// ─── Views ─────────────────────────────────────────────────────────────────

/// One entry of the persisted layout: a record and the version that added it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayoutEntry {
    pub record: Symbol,
    pub introduced_in: u32,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

/// Keys are encoded by variant name, so each key stays addressable no matter
/// where later variants are declared.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Highest schema version whose initializer has committed.
    SchemaVersion,
    /// Set once the given version's initializer has committed.
    VersionInitialized(u32),
    /// Right held by a principal.
    Right(Address, Right),

    // v1
    Core,
    Totals,
    Balance(Address),

    // v2
    YieldConfig,
    YieldAccount(Address),

    // v3
    DelayConfig,
    PendingWithdrawal(Address),
}
