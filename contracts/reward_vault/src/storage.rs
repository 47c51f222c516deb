//! # Storage
//!
//! ## Instance storage
//!
//! | Key           | Type          | Description                          |
//! |---------------|---------------|--------------------------------------|
//! | `Deployer`    | `Address`     | Only account allowed to call `init`  |
//! | `Config`      | `VaultConfig` | Token, registry and penalty policy   |
//! | `PoolBalance` | `i128`        | Unallocated rewards held by the vault |
//!
//! ## Persistent storage
//!
//! | Key                  | Type   | Description                         |
//! |----------------------|--------|-------------------------------------|
//! | `LockCount(owner)`   | `u32`  | Number of locks ever created        |
//! | `Lock(owner, index)` | `Lock` | One lock; indices are never reused  |
//!
//! Locks are append-only: new locks take index `LockCount(owner)`, and
//! existing entries only see `claimed_amount` grow.

use incentive_common::ttl;
use soroban_sdk::{contracttype, Address, Env};

use crate::config::VaultConfig;
use crate::types::Lock;
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Deployer,
    Config,
    PoolBalance,
    LockCount(Address),
    Lock(Address, u32),
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

pub fn get_config(env: &Env) -> Result<VaultConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

// ── Reward pool ──────────────────────────────────────────────────────

pub fn pool_balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PoolBalance)
        .unwrap_or(0)
}

pub fn set_pool_balance(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::PoolBalance, &balance);
}

// ── Locks ────────────────────────────────────────────────────────────

pub fn lock_count(env: &Env, owner: &Address) -> u32 {
    let key = DataKey::LockCount(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(count) => {
            bump_persistent(env, &key);
            count
        }
        None => 0,
    }
}

/// Store `lock` under the owner's next index and return that index.
pub fn append_lock(env: &Env, lock: &Lock) -> Result<u32, Error> {
    let index = lock_count(env, &lock.owner);
    let next = index.checked_add(1).ok_or(Error::Overflow)?;

    let count_key = DataKey::LockCount(lock.owner.clone());
    env.storage().persistent().set(&count_key, &next);
    bump_persistent(env, &count_key);

    save_lock(env, index, lock);
    Ok(index)
}

pub fn load_lock(env: &Env, owner: &Address, index: u32) -> Result<Lock, Error> {
    let key = DataKey::Lock(owner.clone(), index);
    let lock = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(lock)
}

pub fn save_lock(env: &Env, index: u32, lock: &Lock) {
    let key = DataKey::Lock(lock.owner.clone(), index);
    env.storage().persistent().set(&key, lock);
    bump_persistent(env, &key);
}
