//! # Reward Vault Contract
//!
//! Splits contributor rewards into an immediate half and a time-locked half,
//! and releases locks when they mature.
//!
//! | Phase        | Entry Point(s)                                     |
//! |--------------|----------------------------------------------------|
//! | Bootstrap    | `__constructor(deployer)`, [`RewardVault::init`] (deployer), `update_config` |
//! | Funding      | `fund_pool`                                        |
//! | Distribution | `distribute_reward` (Distributor)                  |
//! | Claims       | `claim_locked_tokens`, `claim_lock`                |
//! | Queries      | `get_lock_count`, `get_lock`, `get_locked_summary`, `pool_balance`, `get_config` |
//!
//! ## Custody
//!
//! The vault's token balance always equals `pool_balance` plus the unclaimed
//! remainder of every lock. Distribution moves value from the pool into a
//! lock (and out to the account); claims move it from a lock out to the
//! owner or the slash destination.
//!
//! A matured lock releases its whole remainder at once; there is no further
//! linear vesting after `release_time`.

#![no_std]

use incentive_common::{has_capability, Capability};
use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env, Vec};

mod config;
pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod testutils;

pub use config::VaultConfig;
use events::RewardDistributed;
pub use types::{Lock, LockedSummary};
use types::{early_release, split_reward, EarlyRelease};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 3,
    InvalidAmount = 4,
    InvalidConfig = 5,
    InsufficientBalance = 6,
    NotFound = 7,
    AlreadyClaimed = 8,
    LockNotMatured = 9,
    NothingToClaim = 10,
    InvariantViolation = 11,
    Overflow = 12,
}

#[contract]
pub struct RewardVault;

#[contractimpl]
impl RewardVault {
    // ─────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────

    /// Runs once at deployment and records who may call `init`.
    pub fn __constructor(env: Env, deployer: Address) {
        storage::set_deployer(&env, &deployer);
    }

    /// Store the vault configuration. Must be called exactly once, by the deployer.
    pub fn init(env: Env, config: VaultConfig) -> Result<(), Error> {
        storage::get_deployer(&env)?.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config.validate()?;
        storage::set_config(&env, &config);
        storage::set_pool_balance(&env, 0);
        Ok(())
    }

    /// Replace the configuration. `caller` must hold `Admin`.
    ///
    /// The payout token cannot change while the vault holds custody of it.
    pub fn update_config(env: Env, caller: Address, config: VaultConfig) -> Result<(), Error> {
        caller.require_auth();
        let current = storage::get_config(&env)?;
        Self::require_capability(&env, &current, &caller, Capability::Admin)?;
        config.validate()?;
        if config.token != current.token {
            return Err(Error::InvalidConfig);
        }
        storage::set_config(&env, &config);
        events::emit_config_updated(&env, caller);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pool
    // ─────────────────────────────────────────────────────────

    /// Move `amount` from `from` into the reward pool. Returns the new pool balance.
    pub fn fund_pool(env: Env, from: Address, amount: i128) -> Result<i128, Error> {
        from.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = storage::get_config(&env)?;
        let balance = storage::pool_balance(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        storage::set_pool_balance(&env, balance);
        token::Client::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_pool_funded(&env, from, amount, balance);
        Ok(balance)
    }

    pub fn pool_balance(env: Env) -> i128 {
        storage::pool_balance(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Distribution
    // ─────────────────────────────────────────────────────────

    /// Pay half of `total_amount` to `account` now and lock the rest until
    /// `now + lock_duration`. Returns the index of the new lock.
    ///
    /// `distributor` must hold the `Distributor` capability.
    pub fn distribute_reward(
        env: Env,
        distributor: Address,
        account: Address,
        total_amount: i128,
    ) -> Result<u32, Error> {
        distributor.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &distributor, Capability::Distributor)?;

        if total_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let pool = storage::pool_balance(&env);
        if pool < total_amount {
            return Err(Error::InsufficientBalance);
        }

        let (immediate, locked) = split_reward(total_amount);
        let now = env.ledger().timestamp();
        let release_time = now
            .checked_add(config.lock_duration)
            .ok_or(Error::Overflow)?;

        let lock = Lock {
            owner: account.clone(),
            amount: locked,
            created_at: now,
            release_time,
            claimed_amount: 0,
        };
        let lock_index = storage::append_lock(&env, &lock)?;
        storage::set_pool_balance(&env, pool - total_amount);

        if immediate > 0 {
            token::Client::new(&env, &config.token).transfer(
                &env.current_contract_address(),
                &account,
                &immediate,
            );
        }

        events::emit_reward_distributed(
            &env,
            RewardDistributed {
                account,
                distributor,
                total_amount,
                immediate,
                locked,
                lock_index,
                release_time,
            },
        );
        Ok(lock_index)
    }

    // ─────────────────────────────────────────────────────────
    // Claims
    // ─────────────────────────────────────────────────────────

    /// Release every matured lock of `owner` in a single transfer.
    ///
    /// Fails with `NothingToClaim` if no matured lock has a remainder.
    pub fn claim_locked_tokens(env: Env, owner: Address) -> Result<i128, Error> {
        owner.require_auth();
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();

        // (index, lock, remainder released by this call)
        let mut matured: Vec<(u32, Lock, i128)> = Vec::new(&env);
        let mut total: i128 = 0;
        for index in 0..storage::lock_count(&env, &owner) {
            let lock = storage::load_lock(&env, &owner, index)?;
            let remaining = Self::checked_remaining(&env, &lock, index)?;
            if remaining > 0 && lock.is_matured(now) {
                total = total.checked_add(remaining).ok_or(Error::Overflow)?;
                matured.push_back((index, lock, remaining));
            }
        }
        if total == 0 {
            return Err(Error::NothingToClaim);
        }

        for (index, mut lock, _) in matured.iter() {
            lock.claimed_amount = lock.amount;
            storage::save_lock(&env, index, &lock);
        }

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &owner,
            &total,
        );

        for (index, _, released) in matured.iter() {
            events::emit_locked_claimed(&env, owner.clone(), index, released);
        }
        Ok(total)
    }

    /// Claim a single lock. Returns the amount paid to `owner`.
    ///
    /// - Matured: the whole remainder is released.
    /// - Not matured, `allow_slash = false`: fails with `LockNotMatured`.
    /// - Not matured, `allow_slash = true`: the penalty share of the
    ///   remainder goes to the slash destination and the rest to `owner`.
    ///
    /// Either way the lock ends fully claimed.
    pub fn claim_lock(
        env: Env,
        owner: Address,
        lock_index: u32,
        allow_slash: bool,
    ) -> Result<i128, Error> {
        owner.require_auth();
        let config = storage::get_config(&env)?;
        let mut lock = storage::load_lock(&env, &owner, lock_index)?;
        let remaining = Self::checked_remaining(&env, &lock, lock_index)?;
        if remaining == 0 {
            return Err(Error::AlreadyClaimed);
        }

        let now = env.ledger().timestamp();
        let split = if lock.is_matured(now) {
            EarlyRelease {
                released: remaining,
                slashed: 0,
            }
        } else if allow_slash {
            early_release(remaining, config.early_claim_penalty_bps)?
        } else {
            return Err(Error::LockNotMatured);
        };

        lock.claimed_amount = lock.amount;
        storage::save_lock(&env, lock_index, &lock);

        let token_client = token::Client::new(&env, &config.token);
        let vault = env.current_contract_address();
        if split.released > 0 {
            token_client.transfer(&vault, &owner, &split.released);
        }
        if split.slashed > 0 {
            token_client.transfer(&vault, &config.slash_destination, &split.slashed);
        }

        events::emit_locked_claimed(&env, owner.clone(), lock_index, split.released);
        if split.slashed > 0 {
            events::emit_slashed(
                &env,
                owner,
                lock_index,
                split.slashed,
                config.slash_destination,
            );
        }
        Ok(split.released)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_lock_count(env: Env, owner: Address) -> u32 {
        storage::lock_count(&env, &owner)
    }

    pub fn get_lock(env: Env, owner: Address, lock_index: u32) -> Result<Lock, Error> {
        storage::load_lock(&env, &owner, lock_index)
    }

    /// Aggregate every lock of `owner` in one read.
    pub fn get_locked_summary(env: Env, owner: Address) -> Result<LockedSummary, Error> {
        let now = env.ledger().timestamp();
        let mut summary = LockedSummary {
            lock_count: storage::lock_count(&env, &owner),
            total_locked: 0,
            total_claimed: 0,
            claimable_now: 0,
        };
        for index in 0..summary.lock_count {
            let lock = storage::load_lock(&env, &owner, index)?;
            let remaining = Self::checked_remaining(&env, &lock, index)?;
            summary.total_locked = summary
                .total_locked
                .checked_add(lock.amount)
                .ok_or(Error::Overflow)?;
            summary.total_claimed = summary
                .total_claimed
                .checked_add(lock.claimed_amount)
                .ok_or(Error::Overflow)?;
            if lock.is_matured(now) {
                summary.claimable_now = summary
                    .claimable_now
                    .checked_add(remaining)
                    .ok_or(Error::Overflow)?;
            }
        }
        Ok(summary)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_capability(
        env: &Env,
        config: &VaultConfig,
        caller: &Address,
        capability: Capability,
    ) -> Result<(), Error> {
        if has_capability(env, &config.registry, caller, capability) {
            Ok(())
        } else {
            Err(Error::AccessDenied)
        }
    }

    fn checked_remaining(env: &Env, lock: &Lock, index: u32) -> Result<i128, Error> {
        lock.remaining().map_err(|err| {
            log!(env, "lock invariant violated", lock.owner.clone(), index);
            err
        })
    }
}
