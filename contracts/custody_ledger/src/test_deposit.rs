#![cfg(test)]

use crate::ledger::BUMP_THRESHOLD;
use crate::test_helpers::*;
use crate::types::DataKey;
use crate::LedgerError;
use soroban_sdk::testutils::storage::{Instance as _, Persistent as _};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, FromVal, Symbol};

// ─── deposit ───────────────────────────────────────────────────────────────

#[test]
fn test_deposit_with_fee_credits_net() {
    let e = Env::default();
    let (client, _admin, user, asset, cid) = setup_with_fee(&e, 500);

    let net = client.deposit(&user, &1_000);

    assert_eq!(net, 950);
    assert_eq!(client.balance_of(&user), 950);
    assert_eq!(client.total_deposited(), 950);
    assert_eq!(client.accrued_fees(), 50);
    assert_eq!(token_balance(&e, &asset, &cid), 1_000);
    assert_eq!(token_balance(&e, &asset, &user), DEFAULT_MINT - 1_000);
}

#[test]
fn test_deposit_fee_rounds_down() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup_with_fee(&e, 30);

    // 999 * 30 / 10_000 = 2.997
    assert_eq!(client.deposit(&user, &999), 997);
    assert_eq!(client.accrued_fees(), 2);
}

#[test]
fn test_deposit_without_fee_credits_full_amount() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup(&e);

    assert_eq!(client.deposit(&user, &1_000), 1_000);
    assert_eq!(client.balance_of(&user), 1_000);
    assert_eq!(client.accrued_fees(), 0);
}

#[test]
fn test_deposit_full_fee_credits_nothing() {
    let e = Env::default();
    let (client, _admin, user, asset, cid) = setup_with_fee(&e, 10_000);

    assert_eq!(client.deposit(&user, &1_000), 0);
    assert_eq!(client.balance_of(&user), 0);
    assert_eq!(client.total_deposited(), 0);
    assert_eq!(client.accrued_fees(), 1_000);
    assert_eq!(token_balance(&e, &asset, &cid), 1_000);
}

#[test]
fn test_deposit_rejects_non_positive_amount() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup(&e);

    assert_eq!(client.try_deposit(&user, &0), Err(Ok(LedgerError::InvalidAmount)));
    assert_eq!(client.try_deposit(&user, &-5), Err(Ok(LedgerError::InvalidAmount)));
    assert_eq!(client.total_deposited(), 0);
}

#[test]
fn test_deposit_without_allowance_changes_nothing() {
    let e = Env::default();
    let (client, _admin, _user, asset, cid) = setup_with_fee(&e, 100);

    let stranger = Address::generate(&e);
    StellarAssetClient::new(&e, &asset).mint(&stranger, &5_000);

    assert_eq!(
        client.try_deposit(&stranger, &1_000),
        Err(Ok(LedgerError::TransferFailed))
    );
    assert_eq!(client.balance_of(&stranger), 0);
    assert_eq!(client.total_deposited(), 0);
    assert_eq!(client.accrued_fees(), 0);
    assert_eq!(token_balance(&e, &asset, &stranger), 5_000);
    assert_eq!(token_balance(&e, &asset, &cid), 0);
}

#[test]
fn test_deposit_rejected_while_paused() {
    let e = Env::default();
    let (client, admin, user, _asset, _cid) = setup_v2(&e, 0);
    client.deposit(&user, &1_000);

    client.set_deposits_paused(&admin, &true);
    assert_eq!(
        client.try_deposit(&user, &500),
        Err(Ok(LedgerError::DepositsPaused))
    );

    // Exits stay open.
    assert_eq!(client.withdraw(&user, &400), 600);

    client.set_deposits_paused(&admin, &false);
    assert_eq!(client.deposit(&user, &500), 500);
    assert_eq!(client.balance_of(&user), 1_100);
}

#[test]
fn test_total_tracks_sum_of_balances() {
    let e = Env::default();
    let (client, _admin, alice, asset, cid) = setup_with_fee(&e, 250);
    let bob = fund_account(&e, &asset, &cid, DEFAULT_MINT);
    let carol = fund_account(&e, &asset, &cid, DEFAULT_MINT);

    client.deposit(&alice, &10_000);
    client.deposit(&bob, &7_777);
    client.withdraw(&alice, &2_500);
    client.deposit(&carol, &1);
    client.deposit(&alice, &40);
    client.withdraw(&bob, &7_000);

    let sum = client.balance_of(&alice) + client.balance_of(&bob) + client.balance_of(&carol);
    assert_eq!(client.total_deposited(), sum);
    // Contract holdings cover balances plus retained fees.
    assert_eq!(
        token_balance(&e, &asset, &cid),
        client.total_deposited() + client.accrued_fees()
    );
}

#[test]
fn test_deposit_event() {
    let e = Env::default();
    let (client, _admin, user, _asset, cid) = setup_with_fee(&e, 500);

    client.deposit(&user, &2_000);

    let (name, who, data) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "deposit"));
    assert_eq!(who, user);
    assert_eq!(<(i128, i128)>::from_val(&e, &data), (1_900, 100));
}

// ─── withdraw ──────────────────────────────────────────────────────────────

#[test]
fn test_withdraw_returns_remaining_and_pays_out() {
    let e = Env::default();
    let (client, _admin, user, asset, cid) = setup(&e);
    client.deposit(&user, &1_000);

    assert_eq!(client.withdraw(&user, &300), 700);
    assert_eq!(client.balance_of(&user), 700);
    assert_eq!(client.total_deposited(), 700);
    assert_eq!(token_balance(&e, &asset, &cid), 700);
    assert_eq!(token_balance(&e, &asset, &user), DEFAULT_MINT - 700);

    let (name, _, data) = last_event(&e, &cid);
    assert_eq!(name, Symbol::new(&e, "withdraw"));
    assert_eq!(<(i128, i128)>::from_val(&e, &data), (300, 700));
}

#[test]
fn test_withdraw_more_than_balance_fails() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup(&e);
    client.deposit(&user, &1_000);

    assert_eq!(
        client.try_withdraw(&user, &1_001),
        Err(Ok(LedgerError::InsufficientBalance))
    );
    assert_eq!(client.balance_of(&user), 1_000);
}

#[test]
fn test_withdraw_rejects_non_positive_amount() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup(&e);
    client.deposit(&user, &1_000);

    assert_eq!(client.try_withdraw(&user, &0), Err(Ok(LedgerError::InvalidAmount)));
    assert_eq!(client.try_withdraw(&user, &-1), Err(Ok(LedgerError::InvalidAmount)));
}

#[test]
fn test_withdraw_leaves_pending_request_untouched() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup_v3(&e, 0, ONE_DAY);
    client.deposit(&user, &1_000);
    let req = client.request_withdrawal(&user, &600);

    client.withdraw(&user, &300);
    assert_eq!(client.get_pending_withdrawal(&user), Some(req));

    advance(&e, ONE_DAY);
    assert_eq!(client.execute_withdrawal(&user), 600);
    assert_eq!(client.balance_of(&user), 100);
}

#[test]
fn test_withdraw_transfer_failure_rolls_back() {
    let e = Env::default();
    let (client, _admin, user, asset, _cid) = setup_mock_asset(&e, 0);
    client.deposit(&user, &1_000);

    asset.set_failing(&true);
    assert_eq!(
        client.try_withdraw(&user, &400),
        Err(Ok(LedgerError::TransferFailed))
    );
    assert_eq!(client.balance_of(&user), 1_000);
    assert_eq!(client.total_deposited(), 1_000);
}

#[test]
fn test_deposit_transfer_failure_rolls_back() {
    let e = Env::default();
    let (client, _admin, user, asset, _cid) = setup_mock_asset(&e, 0);

    asset.set_failing(&true);
    assert_eq!(
        client.try_deposit(&user, &1_000),
        Err(Ok(LedgerError::TransferFailed))
    );
    assert_eq!(client.balance_of(&user), 0);
    assert_eq!(client.get_yield_account(&user), None);
}

#[test]
fn test_balance_can_cycle_through_zero() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup(&e);

    client.deposit(&user, &500);
    assert_eq!(client.withdraw(&user, &500), 0);
    assert_eq!(client.total_deposited(), 0);

    client.deposit(&user, &200);
    assert_eq!(client.balance_of(&user), 200);
    assert_eq!(client.total_deposited(), 200);
}

// ─── fee collection ────────────────────────────────────────────────────────

#[test]
fn test_collect_fees_sweeps_retained_fees() {
    let e = Env::default();
    let (client, admin, user, asset, cid) = setup_with_fee(&e, 1_000);
    client.deposit(&user, &5_000);
    let treasury = Address::generate(&e);

    assert_eq!(client.collect_fees(&admin, &treasury), 500);
    assert_eq!(client.accrued_fees(), 0);
    assert_eq!(token_balance(&e, &asset, &treasury), 500);
    assert_eq!(token_balance(&e, &asset, &cid), 4_500);
    // Balances are not touched by a sweep.
    assert_eq!(client.balance_of(&user), 4_500);

    assert_eq!(
        client.try_collect_fees(&admin, &treasury),
        Err(Ok(LedgerError::NoFeesToCollect))
    );
}

#[test]
fn test_collect_fees_requires_admin() {
    let e = Env::default();
    let (client, _admin, user, _asset, _cid) = setup_with_fee(&e, 1_000);
    client.deposit(&user, &5_000);

    assert_eq!(
        client.try_collect_fees(&user, &user),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(client.accrued_fees(), 500);
}

// ─── large amounts ─────────────────────────────────────────────────────────

#[test]
fn test_deposit_fee_exact_at_i128_magnitude() {
    let e = Env::default();
    let (client, admin, user, _asset, _cid) = setup_mock_asset(&e, 0);
    client.set_deposit_fee(&admin, &2_500);

    let (fee, net) = crate::compute_fee(i128::MAX, 2_500).unwrap();
    assert_eq!(fee + net, i128::MAX);
    assert_eq!(fee, i128::MAX / 4);

    assert_eq!(client.deposit(&user, &i128::MAX), net);
    assert_eq!(client.balance_of(&user), net);
    assert_eq!(client.total_deposited(), net);
    assert_eq!(client.accrued_fees(), fee);
}

#[test]
fn test_full_fee_at_i128_magnitude() {
    let e = Env::default();
    let (client, admin, user, _asset, _cid) = setup_mock_asset(&e, 0);
    client.set_deposit_fee(&admin, &10_000);

    assert_eq!(client.deposit(&user, &i128::MAX), 0);
    assert_eq!(client.accrued_fees(), i128::MAX);
}

// ─── storage lifetime ──────────────────────────────────────────────────────

#[test]
fn test_balance_entry_ttl_is_extended() {
    let e = Env::default();
    let (client, _admin, user, _asset, cid) = setup(&e);
    client.deposit(&user, &1_000);

    let (balance_ttl, instance_ttl) = e.as_contract(&cid, || {
        (
            e.storage()
                .persistent()
                .get_ttl(&DataKey::Balance(user.clone())),
            e.storage().instance().get_ttl(),
        )
    });
    assert!(balance_ttl > BUMP_THRESHOLD);
    assert!(instance_ttl > BUMP_THRESHOLD);
}
