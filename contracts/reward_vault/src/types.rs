//! # Types
//!
//! ## Lock lifecycle
//!
//! ```text
//! created (claimed = 0) ──► matured (now ≥ release_time) ──► fully claimed
//!        └──────── early slashed claim ────────────────────►┘
//! ```
//!
//! A lock is never deleted. Once `claimed_amount == amount` it stays in
//! storage as history.

use incentive_common::math::bps_ceil;
use soroban_sdk::{contracttype, Address};

use crate::Error;

/// A time-delayed allocation created by `distribute_reward`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    pub owner: Address,
    pub amount: i128,
    pub created_at: u64,
    pub release_time: u64,
    /// `0 ≤ claimed_amount ≤ amount`.
    pub claimed_amount: i128,
}

impl Lock {
    /// Amount still held for the owner.
    ///
    /// Fails with `InvariantViolation` if the stored lock is inconsistent;
    /// such a lock cannot be claimed again.
    pub fn remaining(&self) -> Result<i128, Error> {
        if self.amount < 0 || self.claimed_amount < 0 || self.claimed_amount > self.amount {
            return Err(Error::InvariantViolation);
        }
        Ok(self.amount - self.claimed_amount)
    }

    pub fn is_matured(&self, now: u64) -> bool {
        now >= self.release_time
    }
}

/// Single-read view over all of an owner's locks.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedSummary {
    pub lock_count: u32,
    pub total_locked: i128,
    pub total_claimed: i128,
    /// What `claim_locked_tokens` would transfer right now.
    pub claimable_now: i128,
}

/// Split of an immature lock's remainder under the early-claim penalty.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EarlyRelease {
    pub released: i128,
    pub slashed: i128,
}

/// Split a reward into its immediate and locked halves.
///
/// `immediate = total / 2` with integer division; any odd unit is locked.
pub fn split_reward(total: i128) -> (i128, i128) {
    let immediate = total / 2;
    (immediate, total - immediate)
}

/// Penalise an early claim. The slash is rounded up so that, for any
/// positive remainder and penalty, `released < remaining`.
pub fn early_release(remaining: i128, penalty_bps: u32) -> Result<EarlyRelease, Error> {
    let slashed = bps_ceil(remaining, penalty_bps).ok_or(Error::Overflow)?;
    Ok(EarlyRelease {
        released: remaining - slashed,
        slashed,
    })
}
