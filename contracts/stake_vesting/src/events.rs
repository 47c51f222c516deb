use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::{Tier, VestType};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDeposited {
    pub owner: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub tier: Tier,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequested {
    pub owner: Address,
    pub amount: i128,
    pub pending_unstake: i128,
    pub available_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawn {
    pub owner: Address,
    pub amount: i128,
    pub penalty: i128,
    pub remaining_stake: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeSlashed {
    pub owner: Address,
    pub amount: i128,
    pub destination: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimed {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFunded {
    pub from: Address,
    pub amount: i128,
    pub reward_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingCreated {
    pub beneficiary: Address,
    pub schedule_index: u32,
    pub vest_type: VestType,
    pub total_amount: i128,
    pub cliff_end: u64,
    pub vesting_end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingReleased {
    pub beneficiary: Address,
    pub schedule_index: u32,
    pub amount: i128,
    pub claimed: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionUnlocked {
    pub beneficiary: Address,
    pub schedule_index: u32,
    pub reporter: Address,
}

pub fn emit_stake_deposited(env: &Env, data: StakeDeposited) {
    env.events()
        .publish((symbol_short!("stk_dep"), data.owner.clone()), data);
}

pub fn emit_unstake_requested(env: &Env, data: UnstakeRequested) {
    env.events()
        .publish((symbol_short!("unstk_req"), data.owner.clone()), data);
}

pub fn emit_stake_withdrawn(env: &Env, data: StakeWithdrawn) {
    env.events()
        .publish((symbol_short!("stk_wdr"), data.owner.clone()), data);
}

pub fn emit_stake_slashed(env: &Env, owner: Address, amount: i128, destination: Address) {
    let topics = (symbol_short!("stk_slash"), owner.clone());
    let data = StakeSlashed {
        owner,
        amount,
        destination,
    };
    env.events().publish(topics, data);
}

pub fn emit_rewards_claimed(env: &Env, owner: Address, amount: i128) {
    let topics = (symbol_short!("rwd_claim"), owner.clone());
    env.events().publish(topics, RewardsClaimed { owner, amount });
}

pub fn emit_rewards_funded(env: &Env, from: Address, amount: i128, reward_pool: i128) {
    let topics = (symbol_short!("rwd_fund"), from.clone());
    let data = RewardsFunded {
        from,
        amount,
        reward_pool,
    };
    env.events().publish(topics, data);
}

pub fn emit_vesting_created(env: &Env, data: VestingCreated) {
    env.events()
        .publish((symbol_short!("vest_new"), data.beneficiary.clone()), data);
}

pub fn emit_vesting_released(env: &Env, data: VestingReleased) {
    env.events()
        .publish((symbol_short!("vest_rel"), data.beneficiary.clone()), data);
}

pub fn emit_contribution_unlocked(env: &Env, data: ContributionUnlocked) {
    env.events()
        .publish((symbol_short!("contrib"), data.beneficiary.clone()), data);
}

pub fn emit_config_updated(env: &Env, by: Address) {
    env.events().publish((symbol_short!("cfg_upd"),), by);
}
