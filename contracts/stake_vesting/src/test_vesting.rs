#![cfg(test)]

use incentive_common::{time::DAY, Capability};
use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::*;
use crate::testutils::Setup;
use crate::{Error, VestType, VestingPolicy, VestingSchedule};

// ─── Creation ────────────────────────────────────────────

#[test]
fn test_create_schedule_uses_policy_of_type() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    let now = s.now();

    let index = s
        .ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Team);

    assert_eq!(index, 0);
    assert_eq!(
        s.ledger.get_schedule(&alice, &0),
        VestingSchedule {
            beneficiary: alice.clone(),
            total_amount: 1_000,
            start_time: now,
            cliff_duration: 180 * DAY,
            vesting_duration: 720 * DAY,
            claimed: 0,
            vest_type: VestType::Team,
            contribution_unlocked: false,
        }
    );
    assert_eq!(s.ledger.get_schedule_count(&alice), 1);
    assert_custody(&s, &[alice]);
}

#[test]
fn test_create_schedule_requires_vesting_admin() {
    let s = Setup::new();
    let impostor = s.account(1_000);
    let alice = Address::generate(&s.env);
    assert_eq!(
        s.ledger
            .try_create_vesting_schedule(&impostor, &alice, &1_000, &VestType::Dao),
        Err(Ok(Error::AccessDenied))
    );
    assert_eq!(s.ledger.get_schedule_count(&alice), 0);
}

#[test]
fn test_create_schedule_rejects_zero_amount() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    assert_eq!(
        s.ledger
            .try_create_vesting_schedule(&s.vesting_admin, &alice, &0, &VestType::Dao),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_unknown_schedule_is_not_found() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    assert_eq!(s.ledger.try_get_schedule(&alice, &0), Err(Ok(Error::NotFound)));
}

// ─── Release curve ───────────────────────────────────────

#[test]
fn test_cliff_then_linear_release() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &3_650, &VestType::Dao);

    s.advance(90 * DAY - 1);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 0);
    s.advance(1);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 0);
    s.advance(73 * DAY);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 730);
    s.advance(292 * DAY);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 3_650);
    s.advance(1_000 * DAY);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 3_650);
}

#[test]
fn test_claimable_never_decreases_over_time() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &999_983, &VestType::Airdrop);

    let mut previous = 0;
    for _ in 0..60 {
        s.advance(4 * DAY);
        let claimable = s.ledger.get_claimable_vested(&alice);
        assert!(claimable >= previous);
        previous = claimable;
    }
    assert_eq!(previous, 999_983);
}

#[test]
fn test_zero_duration_releases_everything_at_cliff() {
    let s = Setup::new();
    let admin = Address::generate(&s.env);
    s.registry.grant(&admin, &Capability::Admin);
    let mut config = s.ledger.get_config();
    config.airdrop_policy = VestingPolicy {
        cliff_duration: 10 * DAY,
        vesting_duration: 0,
    };
    s.ledger.update_config(&admin, &config);

    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &500, &VestType::Airdrop);
    s.advance(10 * DAY - 1);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 0);
    s.advance(1);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 500);
}

// ─── Claims ──────────────────────────────────────────────

#[test]
fn test_claim_vested_twice_without_time_change() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &3_650, &VestType::Dao);
    s.advance(90 * DAY + 73 * DAY);

    assert_eq!(s.ledger.claim_vested(&alice), 730);
    assert_eq!(s.ledger.claim_vested(&alice), 0);
    assert_eq!(s.token.balance(&alice), 730);
    assert_eq!(s.ledger.get_schedule(&alice, &0).claimed, 730);
    assert_custody(&s, &[alice]);
}

#[test]
fn test_claim_vested_before_cliff_returns_zero() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Team);

    assert_eq!(s.ledger.claim_vested(&alice), 0);
    assert_eq!(s.token.balance(&alice), 0);
}

#[test]
fn test_claim_vested_with_nothing_outstanding_fails() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    assert_eq!(
        s.ledger.try_claim_vested(&alice),
        Err(Ok(Error::NothingToClaim))
    );

    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    s.advance(210 * DAY);
    assert_eq!(s.ledger.claim_vested(&alice), 1_000);
    assert_eq!(
        s.ledger.try_claim_vested(&alice),
        Err(Ok(Error::NothingToClaim))
    );
}

#[test]
fn test_claim_vested_sums_schedules_in_one_transfer() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &3_650, &VestType::Dao);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &7_200, &VestType::Team);

    s.advance(90 * DAY + 73 * DAY);
    // Airdrop: 133 of 180 days past its cliff. Dao: 73 of 365. Team: before cliff.
    let expected = 1_000 * 133 / 180 + 730;
    assert_eq!(s.ledger.get_claimable_vested(&alice), expected);
    assert_eq!(s.ledger.claim_vested(&alice), expected);
    assert_eq!(s.token.balance(&alice), expected);
    assert_eq!(s.ledger.get_schedule(&alice, &2).claimed, 0);
    assert_custody(&s, &[alice]);
}

#[test]
fn test_claim_single_schedule_leaves_others() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &3_650, &VestType::Dao);
    s.advance(90 * DAY + 73 * DAY);

    assert_eq!(s.ledger.claim_vested_schedule(&alice, &1), 730);
    assert_eq!(s.ledger.claim_vested_schedule(&alice, &1), 0);
    assert_eq!(s.token.balance(&alice), 730);
    assert_eq!(s.ledger.get_schedule(&alice, &0).claimed, 0);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 1_000 * 133 / 180);
    assert_custody(&s, &[alice.clone()]);

    assert_eq!(
        s.ledger.try_claim_vested_schedule(&alice, &2),
        Err(Ok(Error::NotFound))
    );
}

#[test]
fn test_claim_single_schedule_when_fully_claimed_fails() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    s.advance(210 * DAY);

    assert_eq!(s.ledger.claim_vested_schedule(&alice, &0), 1_000);
    assert_eq!(
        s.ledger.try_claim_vested_schedule(&alice, &0),
        Err(Ok(Error::NothingToClaim))
    );
}

#[test]
fn test_claim_single_schedule_cost_is_independent_of_schedule_count() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    for _ in 0..60 {
        s.ledger
            .create_vesting_schedule(&s.vesting_admin, &alice, &100, &VestType::Airdrop);
    }
    s.advance(400 * DAY);

    assert_eq!(s.ledger.claim_vested_schedule(&alice, &59), 100);
    let resources = s.env.cost_estimate().resources();
    assert!(resources.read_entries <= 10, "reads: {}", resources.read_entries);
    assert!(resources.write_entries <= 5, "writes: {}", resources.write_entries);
    assert_eq!(s.ledger.get_schedule(&alice, &0).claimed, 0);
}

// ─── Contribution unlock ─────────────────────────────────

#[test]
fn test_contribution_unlock_releases_airdrop_early() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 0);

    assert!(s.ledger.unlock_by_contribution(&s.oracle, &alice, &0));
    assert!(s.ledger.get_schedule(&alice, &0).contribution_unlocked);
    assert_eq!(s.ledger.get_claimable_vested(&alice), 1_000);
    assert_eq!(s.ledger.claim_vested(&alice), 1_000);
}

#[test]
fn test_contribution_unlock_is_idempotent() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);

    assert!(s.ledger.unlock_by_contribution(&s.oracle, &alice, &0));
    assert!(!s.ledger.unlock_by_contribution(&s.oracle, &alice, &0));
    assert_eq!(s.ledger.get_claimable_vested(&alice), 1_000);
}

#[test]
fn test_contribution_unlock_only_for_airdrops() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Team);

    assert_eq!(
        s.ledger.try_unlock_by_contribution(&s.oracle, &alice, &0),
        Err(Ok(Error::InvalidState))
    );
    assert_eq!(
        s.ledger.try_unlock_by_contribution(&s.oracle, &alice, &1),
        Err(Ok(Error::NotFound))
    );
}

#[test]
fn test_contribution_unlock_requires_oracle() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);

    assert_eq!(
        s.ledger
            .try_unlock_by_contribution(&s.vesting_admin, &alice, &0),
        Err(Ok(Error::AccessDenied))
    );
    assert!(!s.ledger.get_schedule(&alice, &0).contribution_unlocked);
}
