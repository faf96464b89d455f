//! Versioned Schema Controller
//!
//! Owns the append-only persisted layout and the one-time initializer of each
//! schema version.
//!
//! ## Layout
//! Every version adds its fields as new, self-contained records under new
//! storage keys. A record type is never extended once a version has shipped
//! it; a later version that needs more state adds another record. Each record
//! type declares the version that introduced it through [`VersionedRecord`],
//! and [`LAYOUT`] lists every record in version order. A compile-time check
//! rejects a layout in which a record is placed before one of an earlier
//! version.
//!
//! ## Initializers
//! - Version 1 runs exactly once and creates the core configuration.
//! - Version N (N > 1) runs exactly once, only when the instance is at N-1,
//!   and only for a caller holding [`Right::Upgrade`].
//!
//! The new-field writes of an initializer, its completion flag and the
//! version bump are committed by the same invocation. An initializer that
//! fails leaves none of them behind, so no operation can observe a version
//! that is half applied.

use ledger_errors::LedgerError;
use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::access_control;
use crate::events;
use crate::types::{
    AccountBalance, CoreConfig, DataKey, DelayConfig, LayoutEntry, LedgerTotals, PendingWithdrawal,
    Right, YieldAccount, YieldConfig,
};

pub const V1: u32 = 1;
pub const V2: u32 = 2;
pub const V3: u32 = 3;

/// Highest schema version this code knows how to initialize.
pub const LATEST_VERSION: u32 = V3;

/// A persisted record tagged with the schema version that introduced it.
pub trait VersionedRecord {
    const RECORD: &'static str;
    const INTRODUCED_IN: u32;
}

macro_rules! versioned_record {
    ($ty:ty, $version:expr) => {
        impl VersionedRecord for $ty {
            const RECORD: &'static str = stringify!($ty);
            const INTRODUCED_IN: u32 = $version;
        }
    };
}

versioned_record!(CoreConfig, V1);
versioned_record!(LedgerTotals, V1);
versioned_record!(AccountBalance, V1);
versioned_record!(YieldConfig, V2);
versioned_record!(YieldAccount, V2);
versioned_record!(DelayConfig, V3);
versioned_record!(PendingWithdrawal, V3);

/// A `(record, introduced_in)` pair of the persisted layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutBlock {
    pub record: &'static str,
    pub introduced_in: u32,
}

const fn block<T: VersionedRecord>() -> LayoutBlock {
    LayoutBlock {
        record: T::RECORD,
        introduced_in: T::INTRODUCED_IN,
    }
}

/// Persisted layout in declaration order. New records go at the end.
pub const LAYOUT: [LayoutBlock; 7] = [
    block::<CoreConfig>(),
    block::<LedgerTotals>(),
    block::<AccountBalance>(),
    block::<YieldConfig>(),
    block::<YieldAccount>(),
    block::<DelayConfig>(),
    block::<PendingWithdrawal>(),
];

/// True when no block is introduced by an earlier version than the block
/// before it, and the last block belongs to `latest`.
pub const fn is_append_only(layout: &[LayoutBlock], latest: u32) -> bool {
    if layout.is_empty() {
        return false;
    }
    let mut i = 1;
    while i < layout.len() {
        let prev = layout[i - 1].introduced_in;
        let next = layout[i].introduced_in;
        if next < prev || next > prev + 1 {
            return false;
        }
        i += 1;
    }
    layout[0].introduced_in == V1 && layout[layout.len() - 1].introduced_in == latest
}

const _: () = assert!(is_append_only(&LAYOUT, LATEST_VERSION));

// ─── Version bookkeeping ───────────────────────────────────────────────────

/// Current schema version; 0 before the version-1 initializer has run.
pub fn schema_version(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::SchemaVersion)
        .unwrap_or(0)
}

pub fn is_version_initialized(e: &Env, version: u32) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::VersionInitialized(version))
        .unwrap_or(false)
}

fn commit_version(e: &Env, version: u32) {
    e.storage()
        .instance()
        .set(&DataKey::VersionInitialized(version), &true);
    e.storage().instance().set(&DataKey::SchemaVersion, &version);
}

/// Loads the record of a block only once the instance has reached the
/// version that introduced it.
fn load_block<T>(e: &Env, key: &DataKey, version: u32) -> Option<T>
where
    T: VersionedRecord + soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    if version < T::INTRODUCED_IN {
        return None;
    }
    e.storage().instance().get(key)
}

// ─── Ledger state ──────────────────────────────────────────────────────────

/// Configuration of an initialized instance, composed of one block per
/// schema version. Loaded once at the top of every operation.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub version: u32,
    pub core: CoreConfig,
    pub yield_config: Option<YieldConfig>,
    pub delay_config: Option<DelayConfig>,
}

impl LedgerState {
    pub fn load(e: &Env) -> Result<Self, LedgerError> {
        let version = schema_version(e);
        let core: CoreConfig =
            load_block(e, &DataKey::Core, version).ok_or(LedgerError::NotInitialized)?;
        Ok(Self {
            version,
            core,
            yield_config: load_block(e, &DataKey::YieldConfig, version),
            delay_config: load_block(e, &DataKey::DelayConfig, version),
        })
    }

    /// The version-2 block, or `VersionNotActive` below version 2.
    pub fn yield_config(&self) -> Result<&YieldConfig, LedgerError> {
        self.yield_config
            .as_ref()
            .ok_or(LedgerError::VersionNotActive)
    }

    /// The version-3 block, or `VersionNotActive` below version 3.
    pub fn delay_config(&self) -> Result<&DelayConfig, LedgerError> {
        self.delay_config
            .as_ref()
            .ok_or(LedgerError::VersionNotActive)
    }
}

pub fn save_core(e: &Env, core: &CoreConfig) {
    e.storage().instance().set(&DataKey::Core, core);
}

pub fn save_yield_config(e: &Env, cfg: &YieldConfig) {
    e.storage().instance().set(&DataKey::YieldConfig, cfg);
}

pub fn save_delay_config(e: &Env, cfg: &DelayConfig) {
    e.storage().instance().set(&DataKey::DelayConfig, cfg);
}

// ─── Initializers ──────────────────────────────────────────────────────────

/// Version-1 initializer: creates the core configuration and grants the
/// admin principal its rights.
pub fn initialize_v1(
    e: &Env,
    admin: &Address,
    asset: &Address,
    deposit_fee_bps: u32,
) -> Result<(), LedgerError> {
    if is_version_initialized(e, V1) || schema_version(e) >= V1 {
        return Err(LedgerError::AlreadyInitialized);
    }
    crate::fees::validate_fee_bps(deposit_fee_bps)?;
    admin.require_auth();

    save_core(
        e,
        &CoreConfig {
            asset: asset.clone(),
            admin: admin.clone(),
            deposit_fee_bps,
        },
    );
    e.storage()
        .instance()
        .set(&DataKey::Totals, &LedgerTotals::default());
    access_control::grant(e, admin, Right::Admin);
    access_control::grant(e, admin, Right::Upgrade);

    commit_version(e, V1);
    events::emit_initialized(e, admin, asset, deposit_fee_bps);
    Ok(())
}

/// Runs the one-time initializer of `version` (> 1).
///
/// `apply` performs the version's field setup against the state of the
/// previous version. The version bump is committed only if it succeeds.
pub fn run_initializer<F>(
    e: &Env,
    caller: &Address,
    version: u32,
    apply: F,
) -> Result<(), LedgerError>
where
    F: FnOnce(&LedgerState) -> Result<(), LedgerError>,
{
    let current = schema_version(e);
    if current >= version || is_version_initialized(e, version) {
        return Err(LedgerError::VersionAlreadyInitialized);
    }
    if version > LATEST_VERSION || current.checked_add(1) != Some(version) {
        return Err(LedgerError::VersionSequenceViolation);
    }
    let state = LedgerState::load(e)?;
    access_control::require_right(e, caller, Right::Upgrade)?;

    apply(&state)?;

    commit_version(e, version);
    events::emit_version_initialized(e, caller, current, version);
    Ok(())
}

/// Ordered persisted layout, for off-chain tooling.
pub fn layout_manifest(e: &Env) -> Vec<LayoutEntry> {
    let mut out = Vec::new(e);
    for b in LAYOUT.iter() {
        out.push_back(LayoutEntry {
            record: Symbol::new(e, b.record),
            introduced_in: b.introduced_in,
        });
    }
    out
}
