//! # Types
//!
//! ## Stake state machine
//!
//! The state is derived from the stored amounts, never stored itself:
//!
//! ```text
//!            stake                 request_unstake
//! Unstaked ─────────► Staked ──────────────────────► UnstakePending
//!    ▲                  ▲                                  │
//!    │                  └──── complete_unstake (amount>0) ─┤
//!    └─────────────────────── complete_unstake (amount=0) ─┘
//!    └──────────────── emergency_unstake (any state) ──────┘
//! ```
//!
//! ## Vesting schedules
//!
//! Schedules are append-only per beneficiary. `claimed` only grows and
//! `contribution_unlocked` flips false → true at most once.

use soroban_sdk::{contracttype, Address};

use crate::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeState {
    Unstaked,
    Staked,
    UnstakePending,
}

/// Staking-amount-derived access level.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Tier {
    None,
    Bronze,
    Silver,
    Gold,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub owner: Address,
    /// Actively staked; accrues rewards and counts toward the tier.
    pub amount: i128,
    /// Set by the first deposit of a position, cleared when it is fully withdrawn.
    pub staked_at: Option<u64>,
    pub unstake_requested_at: Option<u64>,
    /// Waiting out the cooldown; no longer accrues.
    pub pending_unstake: i128,
    /// Rewards settled up to `reward_index` and not yet claimed.
    pub accrued_rewards: i128,
    /// Global reward index at the last settlement.
    pub reward_index: i128,
}

impl Stake {
    pub fn new(owner: Address, reward_index: i128) -> Self {
        Self {
            owner,
            amount: 0,
            staked_at: None,
            unstake_requested_at: None,
            pending_unstake: 0,
            accrued_rewards: 0,
            reward_index,
        }
    }

    pub fn state(&self) -> StakeState {
        if self.pending_unstake > 0 {
            StakeState::UnstakePending
        } else if self.amount > 0 {
            StakeState::Staked
        } else {
            StakeState::Unstaked
        }
    }

    /// Fails with `InvariantViolation` if the stored position is inconsistent.
    pub fn check(&self) -> Result<(), Error> {
        if self.amount < 0 || self.pending_unstake < 0 || self.accrued_rewards < 0 {
            return Err(Error::InvariantViolation);
        }
        if self.pending_unstake > 0 && self.unstake_requested_at.is_none() {
            return Err(Error::InvariantViolation);
        }
        Ok(())
    }
}

/// Cumulative `rate_bps × seconds` as of `updated_at`.
///
/// Checkpointed whenever the reward rate changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardIndex {
    pub value: i128,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestType {
    Team,
    Dao,
    Airdrop,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub beneficiary: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub cliff_duration: u64,
    pub vesting_duration: u64,
    pub claimed: i128,
    pub vest_type: VestType,
    pub contribution_unlocked: bool,
}

/// A position as reported by the account overview.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeView {
    Absent,
    Present(Stake),
}

/// Single structured read over one account.
///
/// Each derived field is `None` when it could not be computed (for example an
/// entity failed its invariant check), instead of silently reading as zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountOverview {
    pub stake: StakeView,
    pub state: StakeState,
    pub tier: Tier,
    pub pending_rewards: Option<i128>,
    pub claimable_vested: Option<i128>,
    pub schedule_count: u32,
}
