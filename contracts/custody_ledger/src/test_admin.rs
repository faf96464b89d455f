//! Administrative setters and rights management.

#![cfg(test)]

use crate::test_helpers::*;
use crate::{LedgerError, Right, MAX_WITHDRAWAL_DELAY_SECS};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, FromVal, Symbol};

#[test]
fn test_set_deposit_fee() {
    let e = Env::default();
    let (client, admin, user, _asset, cid) = setup_with_fee(&e, 100);

    client.set_deposit_fee(&admin, &2_000);
    assert_eq!(client.get_config().deposit_fee_bps, 2_000);

    let (name, who, data) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "fee_updated"));
    assert_eq!(who, admin);
    assert_eq!(<(u64, u64)>::from_val(&e, &data), (100, 2_000));

    assert_eq!(client.deposit(&user, &1_000), 800);
}

#[test]
fn test_set_deposit_fee_bounds() {
    let e = Env::default();
    let (client, admin, _user, _asset, _cid) = setup(&e);

    client.set_deposit_fee(&admin, &10_000);
    assert_eq!(
        client.try_set_deposit_fee(&admin, &10_001),
        Err(Ok(LedgerError::FeeOutOfRange))
    );
    assert_eq!(client.get_config().deposit_fee_bps, 10_000);
}

#[test]
fn test_setters_require_admin() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup_v3(&e, 100, ONE_DAY);

    assert_eq!(
        client.try_set_deposit_fee(&user, &10),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_set_yield_rate(&user, &10),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_set_withdrawal_delay(&user, &10),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_set_deposits_paused(&user, &true),
        Err(Ok(LedgerError::Unauthorized))
    );

    assert_eq!(client.get_config().deposit_fee_bps, 0);
    assert_eq!(client.get_yield_config().unwrap().yield_rate_bps, 100);
    assert_eq!(
        client.get_delay_config().unwrap().withdrawal_delay_seconds,
        ONE_DAY
    );
}

#[test]
fn test_set_yield_rate_bounds() {
    let e = Env::default();
    let (client, admin, _user, _asset, _cid) = setup_v2(&e, 100);

    client.set_yield_rate(&admin, &10_000);
    assert_eq!(
        client.try_set_yield_rate(&admin, &10_001),
        Err(Ok(LedgerError::YieldRateOutOfRange))
    );
    assert_eq!(client.get_yield_config().unwrap().yield_rate_bps, 10_000);
}

#[test]
fn test_set_withdrawal_delay_bounds() {
    let e = Env::default();
    let (client, admin, _user, _asset, cid) = setup_v3(&e, 0, ONE_DAY);

    client.set_withdrawal_delay(&admin, &MAX_WITHDRAWAL_DELAY_SECS);
    let (name, _, data) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "delay_updated"));
    assert_eq!(
        <(u64, u64)>::from_val(&e, &data),
        (ONE_DAY, MAX_WITHDRAWAL_DELAY_SECS)
    );

    assert_eq!(
        client.try_set_withdrawal_delay(&admin, &(MAX_WITHDRAWAL_DELAY_SECS + 1)),
        Err(Ok(LedgerError::DelayOutOfRange))
    );
    client.set_withdrawal_delay(&admin, &0);
    assert_eq!(
        client.get_delay_config().unwrap().withdrawal_delay_seconds,
        0
    );
}

#[test]
fn test_setters_gated_by_version() {
    let e = Env::default();
    let (client, admin, _user, _asset, _cid) = setup(&e);

    assert_eq!(
        client.try_set_yield_rate(&admin, &100),
        Err(Ok(LedgerError::VersionNotActive))
    );
    assert_eq!(
        client.try_set_deposits_paused(&admin, &true),
        Err(Ok(LedgerError::VersionNotActive))
    );
    assert_eq!(
        client.try_set_withdrawal_delay(&admin, &100),
        Err(Ok(LedgerError::VersionNotActive))
    );

    client.initialize_v2(&admin, &0);
    assert_eq!(
        client.try_set_withdrawal_delay(&admin, &100),
        Err(Ok(LedgerError::VersionNotActive))
    );
}

#[test]
fn test_pause_right_can_be_delegated() {
    let e = Env::default();
    let (client, admin, user, _asset, cid) = setup_v2(&e, 0);
    let guardian = Address::generate(&e);

    assert_eq!(
        client.try_set_deposits_paused(&guardian, &true),
        Err(Ok(LedgerError::Unauthorized))
    );

    client.grant_right(&admin, &guardian, &Right::Pause);
    assert!(client.has_right(&guardian, &Right::Pause));
    let (name, who, data) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "right_granted"));
    assert_eq!(who, guardian);
    assert_eq!(Right::from_val(&e, &data), Right::Pause);

    client.set_deposits_paused(&guardian, &true);
    assert!(client.get_yield_config().unwrap().deposits_paused);
    assert_eq!(
        client.try_deposit(&user, &10),
        Err(Ok(LedgerError::DepositsPaused))
    );

    client.revoke_right(&admin, &guardian, &Right::Pause);
    assert!(!client.has_right(&guardian, &Right::Pause));
    let (name, _, _) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "right_revoked"));
    assert_eq!(
        client.try_set_deposits_paused(&guardian, &false),
        Err(Ok(LedgerError::Unauthorized))
    );
}

#[test]
fn test_admin_can_lose_pause_right() {
    let e = Env::default();
    let (client, admin, _user, _asset, _cid) = setup_v2(&e, 0);

    client.revoke_right(&admin, &admin, &Right::Pause);
    assert_eq!(
        client.try_set_deposits_paused(&admin, &true),
        Err(Ok(LedgerError::Unauthorized))
    );
    // Admin still holds Admin and can restore it.
    client.grant_right(&admin, &admin, &Right::Pause);
    client.set_deposits_paused(&admin, &true);
}

#[test]
fn test_rights_management_requires_admin() {
    let e = Env::default();
    let (client, admin, user, _asset, _cid) = setup(&e);

    assert_eq!(
        client.try_grant_right(&user, &user, &Right::Admin),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_revoke_right(&user, &admin, &Right::Admin),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert!(!client.has_right(&user, &Right::Admin));
    assert!(client.has_right(&admin, &Right::Admin));
}

#[test]
fn test_granted_admin_can_set_parameters() {
    let e = Env::default();
    let (client, admin, _user, _asset, _cid) = setup(&e);
    let ops = Address::generate(&e);

    client.grant_right(&admin, &ops, &Right::Admin);
    client.set_deposit_fee(&ops, &42);
    assert_eq!(client.get_config().deposit_fee_bps, 42);
}
