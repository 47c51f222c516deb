//! Staking and vesting policy, stored in instance storage.
//!
//! Every threshold, cooldown and penalty is configuration; the defaults below
//! are what `StakingConfig::default_for` produces.

use incentive_common::{math::MAX_BPS, time::DAY};
use soroban_sdk::{contracttype, Address};

use crate::types::VestType;
use crate::Error;

pub const DEFAULT_BRONZE_THRESHOLD: i128 = 1_000;
pub const DEFAULT_SILVER_THRESHOLD: i128 = 5_000;
pub const DEFAULT_GOLD_THRESHOLD: i128 = 25_000;

pub const DEFAULT_UNSTAKE_COOLDOWN: u64 = 7 * DAY;
pub const DEFAULT_EMERGENCY_PENALTY_BPS: u32 = 1_000;
/// Annual staking reward rate.
pub const DEFAULT_REWARD_RATE_BPS: u32 = 500;

/// Minimum staked amount for each tier. Must be strictly ascending.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierThresholds {
    pub bronze: i128,
    pub silver: i128,
    pub gold: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingPolicy {
    pub cliff_duration: u64,
    /// Linear release window after the cliff; zero releases everything at the cliff.
    pub vesting_duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub token: Address,
    pub registry: Address,
    pub tiers: TierThresholds,
    pub unstake_cooldown: u64,
    pub emergency_penalty_bps: u32,
    /// Receives emergency-unstake penalties.
    pub penalty_destination: Address,
    pub reward_rate_bps: u32,
    pub team_policy: VestingPolicy,
    pub dao_policy: VestingPolicy,
    pub airdrop_policy: VestingPolicy,
}

impl StakingConfig {
    pub fn default_for(token: Address, registry: Address, penalty_destination: Address) -> Self {
        Self {
            token,
            registry,
            tiers: TierThresholds {
                bronze: DEFAULT_BRONZE_THRESHOLD,
                silver: DEFAULT_SILVER_THRESHOLD,
                gold: DEFAULT_GOLD_THRESHOLD,
            },
            unstake_cooldown: DEFAULT_UNSTAKE_COOLDOWN,
            emergency_penalty_bps: DEFAULT_EMERGENCY_PENALTY_BPS,
            penalty_destination,
            reward_rate_bps: DEFAULT_REWARD_RATE_BPS,
            team_policy: VestingPolicy {
                cliff_duration: 180 * DAY,
                vesting_duration: 720 * DAY,
            },
            dao_policy: VestingPolicy {
                cliff_duration: 90 * DAY,
                vesting_duration: 365 * DAY,
            },
            airdrop_policy: VestingPolicy {
                cliff_duration: 30 * DAY,
                vesting_duration: 180 * DAY,
            },
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let tiers = &self.tiers;
        if tiers.bronze <= 0 || tiers.silver <= tiers.bronze || tiers.gold <= tiers.silver {
            return Err(Error::InvalidConfig);
        }
        if self.emergency_penalty_bps > MAX_BPS || self.reward_rate_bps > MAX_BPS {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    pub fn policy_for(&self, vest_type: &VestType) -> &VestingPolicy {
        match vest_type {
            VestType::Team => &self.team_policy,
            VestType::Dao => &self.dao_policy,
            VestType::Airdrop => &self.airdrop_policy,
        }
    }
}
