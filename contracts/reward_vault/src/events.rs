use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDistributed {
    pub account: Address,
    pub distributor: Address,
    pub total_amount: i128,
    pub immediate: i128,
    pub locked: i128,
    pub lock_index: u32,
    pub release_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedClaimed {
    pub owner: Address,
    pub lock_index: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slashed {
    pub owner: Address,
    pub lock_index: u32,
    pub amount: i128,
    pub destination: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFunded {
    pub from: Address,
    pub amount: i128,
    pub pool_balance: i128,
}

pub fn emit_reward_distributed(env: &Env, data: RewardDistributed) {
    let topics = (symbol_short!("rwd_dist"), data.account.clone());
    env.events().publish(topics, data);
}

pub fn emit_locked_claimed(env: &Env, owner: Address, lock_index: u32, amount: i128) {
    let topics = (symbol_short!("lock_clm"), owner.clone());
    let data = LockedClaimed {
        owner,
        lock_index,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_slashed(env: &Env, owner: Address, lock_index: u32, amount: i128, destination: Address) {
    let topics = (symbol_short!("slashed"), owner.clone());
    let data = Slashed {
        owner,
        lock_index,
        amount,
        destination,
    };
    env.events().publish(topics, data);
}

pub fn emit_pool_funded(env: &Env, from: Address, amount: i128, pool_balance: i128) {
    let topics = (symbol_short!("pool_fund"), from.clone());
    let data = PoolFunded {
        from,
        amount,
        pool_balance,
    };
    env.events().publish(topics, data);
}

pub fn emit_config_updated(env: &Env, by: Address) {
    env.events().publish((symbol_short!("cfg_upd"),), by);
}
