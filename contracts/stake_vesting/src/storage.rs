//! # Storage
//!
//! ## Instance storage
//!
//! | Key           | Type            | Description                              |
//! |---------------|-----------------|------------------------------------------|
//! | `Deployer`    | `Address`       | Only account allowed to call `init`      |
//! | `Config`      | `StakingConfig` | Token, registry and all policy constants |
//! | `RewardPool`  | `i128`          | Tokens set aside for staking rewards     |
//! | `RewardIndex` | `RewardIndex`   | Reward index checkpoint                  |
//!
//! ## Persistent storage
//!
//! | Key                         | Type              | Description                  |
//! |-----------------------------|-------------------|------------------------------|
//! | `Stake(owner)`              | `Stake`           | One position per account     |
//! | `ScheduleCount(owner)`      | `u32`             | Schedules ever granted       |
//! | `Schedule(owner, index)`    | `VestingSchedule` | Append-only per beneficiary  |

use incentive_common::ttl;
use soroban_sdk::{contracttype, Address, Env};

use crate::config::StakingConfig;
use crate::types::{RewardIndex, Stake, VestingSchedule};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Deployer,
    Config,
    RewardPool,
    RewardIndex,
    Stake(Address),
    ScheduleCount(Address),
    Schedule(Address, u32),
}

// ── TTL helpers ──────────────────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(ttl::INSTANCE_LIFETIME_THRESHOLD, ttl::INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, ttl::PERSISTENT_LIFETIME_THRESHOLD, ttl::PERSISTENT_BUMP_AMOUNT);
}

// ── Configuration ────────────────────────────────────────────────────

pub fn set_deployer(env: &Env, deployer: &Address) {
    env.storage().instance().set(&DataKey::Deployer, deployer);
    bump_instance(env);
}

pub fn get_deployer(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Deployer)
        .ok_or(Error::NotInitialized)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<StakingConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

// ── Reward pool ──────────────────────────────────────────────────────

pub fn reward_pool(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::RewardPool)
        .unwrap_or(0)
}

pub fn set_reward_pool(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::RewardPool, &balance);
}

pub fn reward_index(env: &Env) -> Result<RewardIndex, Error> {
    env.storage()
        .instance()
        .get(&DataKey::RewardIndex)
        .ok_or(Error::NotInitialized)
}

pub fn set_reward_index(env: &Env, checkpoint: &RewardIndex) {
    env.storage().instance().set(&DataKey::RewardIndex, checkpoint);
}

// ── Stakes ───────────────────────────────────────────────────────────

pub fn load_stake(env: &Env, owner: &Address) -> Option<Stake> {
    let key = DataKey::Stake(owner.clone());
    let stake = env.storage().persistent().get(&key);
    if stake.is_some() {
        bump_persistent(env, &key);
    }
    stake
}

pub fn save_stake(env: &Env, stake: &Stake) {
    let key = DataKey::Stake(stake.owner.clone());
    env.storage().persistent().set(&key, stake);
    bump_persistent(env, &key);
}

// ── Vesting schedules ────────────────────────────────────────────────

pub fn schedule_count(env: &Env, beneficiary: &Address) -> u32 {
    let key = DataKey::ScheduleCount(beneficiary.clone());
    match env.storage().persistent().get(&key) {
        Some(count) => {
            bump_persistent(env, &key);
            count
        }
        None => 0,
    }
}

/// Store `schedule` under the beneficiary's next index and return that index.
pub fn append_schedule(env: &Env, schedule: &VestingSchedule) -> Result<u32, Error> {
    let index = schedule_count(env, &schedule.beneficiary);
    let next = index.checked_add(1).ok_or(Error::Overflow)?;

    let count_key = DataKey::ScheduleCount(schedule.beneficiary.clone());
    env.storage().persistent().set(&count_key, &next);
    bump_persistent(env, &count_key);

    save_schedule(env, index, schedule);
    Ok(index)
}

pub fn load_schedule(env: &Env, beneficiary: &Address, index: u32) -> Result<VestingSchedule, Error> {
    let key = DataKey::Schedule(beneficiary.clone(), index);
    let schedule = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(schedule)
}

pub fn save_schedule(env: &Env, index: u32, schedule: &VestingSchedule) {
    let key = DataKey::Schedule(schedule.beneficiary.clone(), index);
    env.storage().persistent().set(&key, schedule);
    bump_persistent(env, &key);
}
