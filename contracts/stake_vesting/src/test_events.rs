extern crate std;

use incentive_common::time::DAY;
use soroban_sdk::{
    symbol_short, testutils::{Address as _, Events}, vec, Address, IntoVal, Symbol, TryIntoVal, Val,
    Vec,
};

use crate::config::DEFAULT_UNSTAKE_COOLDOWN;
use crate::events::{
    ContributionUnlocked, RewardsClaimed, StakeDeposited, StakeSlashed, StakeWithdrawn,
    UnstakeRequested, VestingCreated, VestingReleased,
};
use crate::testutils::Setup;
use crate::{Tier, VestType};

fn last_event(s: &Setup, name: Symbol) -> (Vec<Val>, Val) {
    let events = s.env.events().all();
    for i in (0..events.len()).rev() {
        let (contract, topics, data) = events.get(i).unwrap();
        if contract != s.ledger.address {
            continue;
        }
        let head: Symbol = topics.get(0).unwrap().try_into_val(&s.env).unwrap();
        if head == name {
            return (topics, data);
        }
    }
    panic!("no event found");
}

#[test]
fn test_stake_deposited_event() {
    let s = Setup::new();
    let alice = s.account(5_000);
    s.ledger.stake(&alice, &5_000);

    let (topics, data) = last_event(&s, symbol_short!("stk_dep"));
    let expected_topics = vec![&s.env, symbol_short!("stk_dep").into_val(&s.env), alice.into_val(&s.env)];
    assert_eq!(topics, expected_topics);

    let event_data: StakeDeposited = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, StakeDeposited {
        owner: alice,
        amount: 5_000,
        total_staked: 5_000,
        tier: Tier::Silver,
    });
}

#[test]
fn test_unstake_requested_event() {
    let s = Setup::new();
    let alice = s.account(1_000);
    s.ledger.stake(&alice, &1_000);
    let now = s.now();
    s.ledger.request_unstake(&alice, &400);

    let (_, data) = last_event(&s, symbol_short!("unstk_req"));
    let event_data: UnstakeRequested = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, UnstakeRequested {
        owner: alice,
        amount: 400,
        pending_unstake: 400,
        available_at: now + DEFAULT_UNSTAKE_COOLDOWN,
    });
}

#[test]
fn test_complete_unstake_emits_withdrawn() {
    let s = Setup::new();
    let alice = s.account(1_000);
    s.ledger.stake(&alice, &1_000);
    s.ledger.request_unstake(&alice, &400);
    s.advance(DEFAULT_UNSTAKE_COOLDOWN);
    s.ledger.complete_unstake(&alice);

    let (_, data) = last_event(&s, symbol_short!("stk_wdr"));
    let event_data: StakeWithdrawn = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, StakeWithdrawn {
        owner: alice,
        amount: 400,
        penalty: 0,
        remaining_stake: 600,
    });
}

#[test]
fn test_emergency_unstake_emits_withdrawn_and_slashed() {
    let s = Setup::new();
    let alice = s.account(2_000);
    s.ledger.stake(&alice, &2_000);
    s.ledger.emergency_unstake(&alice);

    let (_, data) = last_event(&s, symbol_short!("stk_wdr"));
    let withdrawn: StakeWithdrawn = data.try_into_val(&s.env).unwrap();
    assert_eq!(withdrawn, StakeWithdrawn {
        owner: alice.clone(),
        amount: 1_800,
        penalty: 200,
        remaining_stake: 0,
    });

    let (topics, data) = last_event(&s, symbol_short!("stk_slash"));
    let expected_topics = vec![&s.env, symbol_short!("stk_slash").into_val(&s.env), alice.into_val(&s.env)];
    assert_eq!(topics, expected_topics);
    let slashed: StakeSlashed = data.try_into_val(&s.env).unwrap();
    assert_eq!(slashed, StakeSlashed {
        owner: alice,
        amount: 200,
        destination: s.penalty_sink.clone(),
    });
}

#[test]
fn test_rewards_claimed_event() {
    let s = Setup::new();
    s.fund_rewards(1_000);
    let alice = s.account(10_000);
    s.ledger.stake(&alice, &10_000);
    s.advance(incentive_common::time::YEAR);
    s.ledger.claim_rewards(&alice);

    let (_, data) = last_event(&s, symbol_short!("rwd_claim"));
    let event_data: RewardsClaimed = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, RewardsClaimed {
        owner: alice,
        amount: 500,
    });
}

#[test]
fn test_vesting_created_event() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    let now = s.now();
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Dao);

    let (topics, data) = last_event(&s, symbol_short!("vest_new"));
    let expected_topics = vec![&s.env, symbol_short!("vest_new").into_val(&s.env), alice.into_val(&s.env)];
    assert_eq!(topics, expected_topics);

    let event_data: VestingCreated = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, VestingCreated {
        beneficiary: alice,
        schedule_index: 0,
        vest_type: VestType::Dao,
        total_amount: 1_000,
        cliff_end: now + 90 * DAY,
        vesting_end: now + 455 * DAY,
    });
}

#[test]
fn test_vesting_released_event() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &3_650, &VestType::Dao);
    s.advance(90 * DAY + 73 * DAY);
    s.ledger.claim_vested(&alice);

    let (_, data) = last_event(&s, symbol_short!("vest_rel"));
    let event_data: VestingReleased = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, VestingReleased {
        beneficiary: alice,
        schedule_index: 0,
        amount: 730,
        claimed: 730,
    });
}

#[test]
fn test_contribution_unlocked_event() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.ledger
        .create_vesting_schedule(&s.vesting_admin, &alice, &1_000, &VestType::Airdrop);
    s.ledger.unlock_by_contribution(&s.oracle, &alice, &0);

    let (_, data) = last_event(&s, symbol_short!("contrib"));
    let event_data: ContributionUnlocked = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data, ContributionUnlocked {
        beneficiary: alice,
        schedule_index: 0,
        reporter: s.oracle.clone(),
    });
}
