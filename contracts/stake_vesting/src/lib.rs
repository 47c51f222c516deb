//! # Stake & Vesting Ledger
//!
//! Holds staked tokens behind an unstake cooldown, derives an access tier
//! from the staked amount, pays a time-proportional staking reward out of a
//! funded pool, and releases vesting schedules on a cliff-then-linear curve.
//!
//! | Phase     | Entry Point(s)                                                          |
//! |-----------|-------------------------------------------------------------------------|
//! | Bootstrap | `__constructor(deployer)`, [`StakeVesting::init`] (deployer), `update_config` |
//! | Staking   | `stake`, `request_unstake`, `complete_unstake`, `emergency_unstake`     |
//! | Rewards   | `fund_rewards`, `claim_rewards`                                         |
//! | Vesting   | `create_vesting_schedule` (VestingAdmin), `claim_vested`, `claim_vested_schedule`, `unlock_by_contribution` (ContributionOracle) |
//! | Queries   | `get_staking_tier`, `stakes`, `get_stake_state`, `get_pending_rewards`, `get_claimable_vested`, `get_schedule_count`, `get_schedule`, `get_account_overview` |
//!
//! ## Custody
//!
//! The contract's token balance covers every stake (`amount` and
//! `pending_unstake`), the reward pool, and the unclaimed remainder of every
//! vesting schedule. Rewards are only ever paid out of the pool.
//!
//! ## Reward accrual
//!
//! Rewards follow a global index of `rate_bps × seconds`. Each stake records
//! the index it last settled at, and `update_config` checkpoints the index
//! before a new rate takes effect, so elapsed time keeps the rate it ran at.

#![no_std]

use incentive_common::{has_capability, math::bps_floor, Capability};
use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env, Vec};

mod config;
pub mod events;
mod staking;
mod storage;
mod types;
mod vesting;

#[cfg(test)]
mod testutils;
#[cfg(test)]
mod test_vesting;
#[cfg(test)]
mod test_events;

pub use config::{StakingConfig, TierThresholds, VestingPolicy};
use events::{
    ContributionUnlocked, StakeDeposited, StakeWithdrawn, UnstakeRequested, VestingCreated,
    VestingReleased,
};
pub use types::{
    AccountOverview, RewardIndex, Stake, StakeState, StakeView, Tier, VestType, VestingSchedule,
};

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
    InsufficientStake = 7,
    NotFound = 8,
    InvalidState = 9,
    UnstakeNotReady = 10,
    NothingToClaim = 11,
    InvariantViolation = 12,
    Overflow = 13,
}

#[contract]
pub struct StakeVesting;

#[contractimpl]
impl StakeVesting {
    // ─────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────

    /// Runs once at deployment and records who may call `init`.
    pub fn __constructor(env: Env, deployer: Address) {
        storage::set_deployer(&env, &deployer);
    }

    /// Store the ledger configuration. Must be called exactly once, by the deployer.
    pub fn init(env: Env, config: StakingConfig) -> Result<(), Error> {
        storage::get_deployer(&env)?.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config.validate()?;
        storage::set_config(&env, &config);
        storage::set_reward_pool(&env, 0);
        storage::set_reward_index(
            &env,
            &RewardIndex {
                value: 0,
                updated_at: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Replace the configuration. `caller` must hold `Admin`; the token is fixed.
    ///
    /// A new reward rate only applies from now on.
    pub fn update_config(env: Env, caller: Address, config: StakingConfig) -> Result<(), Error> {
        caller.require_auth();
        let current = storage::get_config(&env)?;
        Self::require_capability(&env, &current, &caller, Capability::Admin)?;
        config.validate()?;
        if config.token != current.token {
            return Err(Error::InvalidConfig);
        }
        if config.reward_rate_bps != current.reward_rate_bps {
            let now = env.ledger().timestamp();
            let checkpoint = RewardIndex {
                value: Self::reward_index(&env, &current, now)?,
                updated_at: now,
            };
            storage::set_reward_index(&env, &checkpoint);
        }
        storage::set_config(&env, &config);
        events::emit_config_updated(&env, caller);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Staking
    // ─────────────────────────────────────────────────────────

    /// Add `amount` to the caller's active stake. Returns the new staked amount.
    ///
    /// A pending withdrawal is left untouched.
    pub fn stake(env: Env, owner: Address, amount: i128) -> Result<i128, Error> {
        owner.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();
        let index = Self::reward_index(&env, &config, now)?;

        let mut stake = match Self::load_stake(&env, &owner)? {
            Some(stake) => stake,
            None => Stake::new(owner.clone(), index),
        };
        staking::settle(&mut stake, index)?;
        stake.amount = stake.amount.checked_add(amount).ok_or(Error::Overflow)?;
        if stake.staked_at.is_none() {
            stake.staked_at = Some(now);
        }
        storage::save_stake(&env, &stake);

        token::Client::new(&env, &config.token).transfer(
            &owner,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_stake_deposited(
            &env,
            StakeDeposited {
                owner,
                amount,
                total_staked: stake.amount,
                tier: staking::tier_for(stake.amount, &config.tiers),
            },
        );
        Ok(stake.amount)
    }

    /// Move `amount` out of the active stake into the cooldown.
    ///
    /// A second request adds to the pending amount and restarts the cooldown.
    /// Returns the time at which `complete_unstake` becomes possible.
    pub fn request_unstake(env: Env, owner: Address, amount: i128) -> Result<u64, Error> {
        owner.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = storage::get_config(&env)?;
        let mut stake = Self::load_stake(&env, &owner)?.ok_or(Error::InsufficientStake)?;
        if amount > stake.amount {
            return Err(Error::InsufficientStake);
        }

        let now = env.ledger().timestamp();
        let available_at = now
            .checked_add(config.unstake_cooldown)
            .ok_or(Error::Overflow)?;
        staking::settle(&mut stake, Self::reward_index(&env, &config, now)?)?;
        stake.amount -= amount;
        stake.pending_unstake = stake
            .pending_unstake
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        stake.unstake_requested_at = Some(now);
        storage::save_stake(&env, &stake);

        events::emit_unstake_requested(
            &env,
            UnstakeRequested {
                owner,
                amount,
                pending_unstake: stake.pending_unstake,
                available_at,
            },
        );
        Ok(available_at)
    }

    /// Pay out the pending withdrawal once the cooldown has elapsed.
    pub fn complete_unstake(env: Env, owner: Address) -> Result<i128, Error> {
        owner.require_auth();
        let config = storage::get_config(&env)?;
        let mut stake = Self::load_stake(&env, &owner)?.ok_or(Error::InvalidState)?;
        if stake.pending_unstake == 0 {
            return Err(Error::InvalidState);
        }
        let requested_at = stake.unstake_requested_at.ok_or(Error::InvariantViolation)?;
        let available_at = requested_at
            .checked_add(config.unstake_cooldown)
            .ok_or(Error::Overflow)?;
        if env.ledger().timestamp() < available_at {
            return Err(Error::UnstakeNotReady);
        }

        let payout = stake.pending_unstake;
        stake.pending_unstake = 0;
        stake.unstake_requested_at = None;
        if stake.amount == 0 {
            stake.staked_at = None;
        }
        storage::save_stake(&env, &stake);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &owner,
            &payout,
        );

        events::emit_stake_withdrawn(
            &env,
            StakeWithdrawn {
                owner,
                amount: payout,
                penalty: 0,
                remaining_stake: stake.amount,
            },
        );
        Ok(payout)
    }

    /// Withdraw everything immediately, skipping the cooldown.
    ///
    /// The penalty share goes to the penalty destination. Rewards accrued so
    /// far stay claimable. Returns the amount paid to `owner`.
    pub fn emergency_unstake(env: Env, owner: Address) -> Result<i128, Error> {
        owner.require_auth();
        let config = storage::get_config(&env)?;
        let mut stake = Self::load_stake(&env, &owner)?.ok_or(Error::InsufficientStake)?;
        let position = stake
            .amount
            .checked_add(stake.pending_unstake)
            .ok_or(Error::Overflow)?;
        if position == 0 {
            return Err(Error::InsufficientStake);
        }

        let penalty =
            bps_floor(position, config.emergency_penalty_bps).ok_or(Error::Overflow)?;
        let payout = position - penalty;

        let now = env.ledger().timestamp();
        staking::settle(&mut stake, Self::reward_index(&env, &config, now)?)?;
        stake.amount = 0;
        stake.pending_unstake = 0;
        stake.staked_at = None;
        stake.unstake_requested_at = None;
        storage::save_stake(&env, &stake);

        let token_client = token::Client::new(&env, &config.token);
        let contract = env.current_contract_address();
        if payout > 0 {
            token_client.transfer(&contract, &owner, &payout);
        }
        if penalty > 0 {
            token_client.transfer(&contract, &config.penalty_destination, &penalty);
        }

        events::emit_stake_withdrawn(
            &env,
            StakeWithdrawn {
                owner: owner.clone(),
                amount: payout,
                penalty,
                remaining_stake: 0,
            },
        );
        if penalty > 0 {
            events::emit_stake_slashed(&env, owner, penalty, config.penalty_destination);
        }
        Ok(payout)
    }

    pub fn get_staking_tier(env: Env, account: Address) -> Result<Tier, Error> {
        let config = storage::get_config(&env)?;
        let amount = storage::load_stake(&env, &account)
            .map(|stake| stake.amount)
            .unwrap_or(0);
        Ok(staking::tier_for(amount, &config.tiers))
    }

    pub fn stakes(env: Env, account: Address) -> Option<Stake> {
        storage::load_stake(&env, &account)
    }

    pub fn get_stake_state(env: Env, account: Address) -> StakeState {
        storage::load_stake(&env, &account)
            .map(|stake| stake.state())
            .unwrap_or(StakeState::Unstaked)
    }

    // ─────────────────────────────────────────────────────────
    // Staking rewards
    // ─────────────────────────────────────────────────────────

    /// Move `amount` from `from` into the reward pool. Returns the new pool balance.
    pub fn fund_rewards(env: Env, from: Address, amount: i128) -> Result<i128, Error> {
        from.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = storage::get_config(&env)?;
        let balance = storage::reward_pool(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        storage::set_reward_pool(&env, balance);
        token::Client::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_rewards_funded(&env, from, amount, balance);
        Ok(balance)
    }

    pub fn reward_pool(env: Env) -> i128 {
        storage::reward_pool(&env)
    }

    pub fn get_pending_rewards(env: Env, account: Address) -> Result<i128, Error> {
        let config = storage::get_config(&env)?;
        match Self::load_stake(&env, &account)? {
            Some(stake) => {
                let index = Self::reward_index(&env, &config, env.ledger().timestamp())?;
                staking::pending_rewards(&stake, index)
            }
            None => Ok(0),
        }
    }

    /// Pay every reward accrued so far out of the pool.
    pub fn claim_rewards(env: Env, owner: Address) -> Result<i128, Error> {
        owner.require_auth();
        let config = storage::get_config(&env)?;
        let mut stake = Self::load_stake(&env, &owner)?.ok_or(Error::NothingToClaim)?;
        let index = Self::reward_index(&env, &config, env.ledger().timestamp())?;
        staking::settle(&mut stake, index)?;

        let amount = stake.accrued_rewards;
        if amount == 0 {
            return Err(Error::NothingToClaim);
        }
        let pool = storage::reward_pool(&env);
        if pool < amount {
            return Err(Error::InsufficientBalance);
        }

        stake.accrued_rewards = 0;
        storage::save_stake(&env, &stake);
        storage::set_reward_pool(&env, pool - amount);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &owner,
            &amount,
        );

        events::emit_rewards_claimed(&env, owner, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Vesting
    // ─────────────────────────────────────────────────────────

    /// Grant `amount` to `beneficiary` on the policy of `vest_type`, starting now.
    ///
    /// `admin` must hold `VestingAdmin` and funds the schedule. Returns the
    /// schedule's index for that beneficiary.
    pub fn create_vesting_schedule(
        env: Env,
        admin: Address,
        beneficiary: Address,
        amount: i128,
        vest_type: VestType,
    ) -> Result<u32, Error> {
        admin.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &admin, Capability::VestingAdmin)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let policy = config.policy_for(&vest_type);
        let cliff_end = now
            .checked_add(policy.cliff_duration)
            .ok_or(Error::Overflow)?;
        let vesting_end = cliff_end
            .checked_add(policy.vesting_duration)
            .ok_or(Error::Overflow)?;

        let schedule = VestingSchedule {
            beneficiary: beneficiary.clone(),
            total_amount: amount,
            start_time: now,
            cliff_duration: policy.cliff_duration,
            vesting_duration: policy.vesting_duration,
            claimed: 0,
            vest_type,
            contribution_unlocked: false,
        };
        let schedule_index = storage::append_schedule(&env, &schedule)?;

        token::Client::new(&env, &config.token).transfer(
            &admin,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_vesting_created(
            &env,
            VestingCreated {
                beneficiary,
                schedule_index,
                vest_type,
                total_amount: amount,
                cliff_end,
                vesting_end,
            },
        );
        Ok(schedule_index)
    }

    /// Sum of vested-but-unclaimed amounts over every schedule of `beneficiary`.
    pub fn get_claimable_vested(env: Env, beneficiary: Address) -> Result<i128, Error> {
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;
        for index in 0..storage::schedule_count(&env, &beneficiary) {
            let schedule = storage::load_schedule(&env, &beneficiary, index)?;
            let claimable = Self::checked_claimable(&env, &schedule, index, now)?;
            total = total.checked_add(claimable).ok_or(Error::Overflow)?;
        }
        Ok(total)
    }

    /// Release everything currently vested across all schedules in one transfer.
    ///
    /// Fails with `NothingToClaim` only when no schedule has anything left at
    /// all. If tokens are still vesting but none are claimable yet, returns 0.
    pub fn claim_vested(env: Env, beneficiary: Address) -> Result<i128, Error> {
        beneficiary.require_auth();
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();

        // (index, schedule, amount released by this call)
        let mut touched: Vec<(u32, VestingSchedule, i128)> = Vec::new(&env);
        let mut total: i128 = 0;
        let mut outstanding: i128 = 0;
        for index in 0..storage::schedule_count(&env, &beneficiary) {
            let schedule = storage::load_schedule(&env, &beneficiary, index)?;
            let claimable = Self::checked_claimable(&env, &schedule, index, now)?;
            outstanding = outstanding
                .checked_add(vesting::outstanding(&schedule))
                .ok_or(Error::Overflow)?;
            if claimable > 0 {
                total = total.checked_add(claimable).ok_or(Error::Overflow)?;
                touched.push_back((index, schedule, claimable));
            }
        }
        if outstanding == 0 {
            return Err(Error::NothingToClaim);
        }
        if total == 0 {
            return Ok(0);
        }

        let mut released: Vec<(u32, i128, i128)> = Vec::new(&env);
        for (index, mut schedule, amount) in touched.iter() {
            schedule.claimed += amount;
            storage::save_schedule(&env, index, &schedule);
            released.push_back((index, amount, schedule.claimed));
        }

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &beneficiary,
            &total,
        );

        for (schedule_index, amount, claimed) in released.iter() {
            events::emit_vesting_released(
                &env,
                VestingReleased {
                    beneficiary: beneficiary.clone(),
                    schedule_index,
                    amount,
                    claimed,
                },
            );
        }
        Ok(total)
    }

    /// Release what is currently vested on a single schedule.
    ///
    /// Same outcomes as `claim_vested`, restricted to `schedule_index`, so a
    /// beneficiary with many schedules can always claim them one at a time.
    pub fn claim_vested_schedule(
        env: Env,
        beneficiary: Address,
        schedule_index: u32,
    ) -> Result<i128, Error> {
        beneficiary.require_auth();
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();

        let mut schedule = storage::load_schedule(&env, &beneficiary, schedule_index)?;
        let amount = Self::checked_claimable(&env, &schedule, schedule_index, now)?;
        if vesting::outstanding(&schedule) == 0 {
            return Err(Error::NothingToClaim);
        }
        if amount == 0 {
            return Ok(0);
        }

        schedule.claimed += amount;
        storage::save_schedule(&env, schedule_index, &schedule);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &beneficiary,
            &amount,
        );

        events::emit_vesting_released(
            &env,
            VestingReleased {
                beneficiary,
                schedule_index,
                amount,
                claimed: schedule.claimed,
            },
        );
        Ok(amount)
    }

    /// Mark an airdrop schedule as fully vested because its beneficiary
    /// completed a contribution. `caller` must hold `ContributionOracle`.
    ///
    /// Returns `false` without emitting anything if the schedule was already
    /// unlocked, so relaying the same completion twice is harmless.
    pub fn unlock_by_contribution(
        env: Env,
        caller: Address,
        beneficiary: Address,
        schedule_index: u32,
    ) -> Result<bool, Error> {
        caller.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &caller, Capability::ContributionOracle)?;

        let mut schedule = storage::load_schedule(&env, &beneficiary, schedule_index)?;
        if schedule.vest_type != VestType::Airdrop {
            return Err(Error::InvalidState);
        }
        if schedule.contribution_unlocked {
            return Ok(false);
        }
        schedule.contribution_unlocked = true;
        storage::save_schedule(&env, schedule_index, &schedule);

        events::emit_contribution_unlocked(
            &env,
            ContributionUnlocked {
                beneficiary,
                schedule_index,
                reporter: caller,
            },
        );
        Ok(true)
    }

    pub fn get_schedule_count(env: Env, beneficiary: Address) -> u32 {
        storage::schedule_count(&env, &beneficiary)
    }

    pub fn get_schedule(
        env: Env,
        beneficiary: Address,
        schedule_index: u32,
    ) -> Result<VestingSchedule, Error> {
        storage::load_schedule(&env, &beneficiary, schedule_index)
    }

    // ─────────────────────────────────────────────────────────
    // Aggregated read
    // ─────────────────────────────────────────────────────────

    /// Everything about one account in a single call.
    ///
    /// Derived amounts that cannot be computed come back as `None`.
    pub fn get_account_overview(env: Env, account: Address) -> Result<AccountOverview, Error> {
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();
        let stake = storage::load_stake(&env, &account);

        let (state, tier, pending_rewards) = match &stake {
            Some(stake) => (
                stake.state(),
                staking::tier_for(stake.amount, &config.tiers),
                stake
                    .check()
                    .and_then(|_| Self::reward_index(&env, &config, now))
                    .and_then(|index| staking::pending_rewards(stake, index))
                    .ok(),
            ),
            None => (StakeState::Unstaked, Tier::None, Some(0)),
        };

        Ok(AccountOverview {
            stake: match stake {
                Some(stake) => StakeView::Present(stake),
                None => StakeView::Absent,
            },
            state,
            tier,
            pending_rewards,
            claimable_vested: Self::get_claimable_vested(env.clone(), account.clone()).ok(),
            schedule_count: storage::schedule_count(&env, &account),
        })
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_capability(
        env: &Env,
        config: &StakingConfig,
        caller: &Address,
        capability: Capability,
    ) -> Result<(), Error> {
        if has_capability(env, &config.registry, caller, capability) {
            Ok(())
        } else {
            Err(Error::AccessDenied)
        }
    }

    fn reward_index(env: &Env, config: &StakingConfig, now: u64) -> Result<i128, Error> {
        staking::index_at(&storage::reward_index(env)?, config.reward_rate_bps, now)
    }

    fn load_stake(env: &Env, owner: &Address) -> Result<Option<Stake>, Error> {
        match storage::load_stake(env, owner) {
            Some(stake) => {
                stake.check().map_err(|err| {
                    log!(env, "stake invariant violated", owner.clone());
                    err
                })?;
                Ok(Some(stake))
            }
            None => Ok(None),
        }
    }

    fn checked_claimable(
        env: &Env,
        schedule: &VestingSchedule,
        index: u32,
        now: u64,
    ) -> Result<i128, Error> {
        vesting::claimable(schedule, now).map_err(|err| {
            if err == Error::InvariantViolation {
                log!(env, "schedule invariant violated", schedule.beneficiary.clone(), index);
            }
            err
        })
    }
}
