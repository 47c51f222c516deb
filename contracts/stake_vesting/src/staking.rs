//! Pure staking arithmetic: tiers and reward accrual.

use incentive_common::{math::mul_div, math::MAX_BPS, time::YEAR};

use crate::config::TierThresholds;
use crate::types::{RewardIndex, Stake, Tier};
use crate::Error;

/// Tier for a staked amount. Recomputed on every read.
pub fn tier_for(amount: i128, tiers: &TierThresholds) -> Tier {
    if amount >= tiers.gold {
        Tier::Gold
    } else if amount >= tiers.silver {
        Tier::Silver
    } else if amount >= tiers.bronze {
        Tier::Bronze
    } else {
        Tier::None
    }
}

/// Reward index at `now`: the stored checkpoint plus `rate_bps × seconds`
/// since it was taken.
///
/// The index only grows. A stake earns `amount × Δindex / (10 000 × YEAR)`
/// between two readings, so a rate change never reprices elapsed time as
/// long as the checkpoint is taken before the rate is replaced.
pub fn index_at(checkpoint: &RewardIndex, rate_bps: u32, now: u64) -> Result<i128, Error> {
    let elapsed = now.saturating_sub(checkpoint.updated_at) as i128;
    let growth = (rate_bps as i128)
        .checked_mul(elapsed)
        .ok_or(Error::Overflow)?;
    checkpoint.value.checked_add(growth).ok_or(Error::Overflow)
}

/// Rewards earned by `stake.amount` since the stake last settled at `stake.reward_index`.
pub fn accrued_since(stake: &Stake, index: i128) -> Result<i128, Error> {
    let delta = index.saturating_sub(stake.reward_index);
    if delta <= 0 || stake.amount == 0 {
        return Ok(0);
    }
    let denominator = (MAX_BPS as i128) * (YEAR as i128);
    mul_div(stake.amount, delta, denominator).ok_or(Error::Overflow)
}

/// Rewards claimable at `index` without mutating the stake.
pub fn pending_rewards(stake: &Stake, index: i128) -> Result<i128, Error> {
    stake
        .accrued_rewards
        .checked_add(accrued_since(stake, index)?)
        .ok_or(Error::Overflow)
}

/// Fold everything earned so far into `accrued_rewards`.
///
/// Must run before any change to `stake.amount`.
pub fn settle(stake: &mut Stake, index: i128) -> Result<(), Error> {
    stake.accrued_rewards = pending_rewards(stake, index)?;
    stake.reward_index = index;
    Ok(())
}
