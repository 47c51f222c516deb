//! Pure vesting arithmetic.
//!
//! ```text
//! vested
//!   total ┤                 ┌───────────
//!         │               ╱
//!         │             ╱
//!       0 ┼───────────┘
//!         start     cliff   cliff+duration
//! ```
//!
//! A contribution-unlocked schedule is fully vested regardless of time.

use incentive_common::math::mul_div;

use crate::types::VestingSchedule;
use crate::Error;

/// Amount of `schedule` vested at `now`, ignoring what was already claimed.
pub fn vested_amount(schedule: &VestingSchedule, now: u64) -> Result<i128, Error> {
    if schedule.contribution_unlocked {
        return Ok(schedule.total_amount);
    }
    let cliff_end = schedule.start_time.saturating_add(schedule.cliff_duration);
    if now < cliff_end {
        return Ok(0);
    }
    let elapsed = now - cliff_end;
    if schedule.vesting_duration == 0 || elapsed >= schedule.vesting_duration {
        return Ok(schedule.total_amount);
    }
    mul_div(
        schedule.total_amount,
        elapsed as i128,
        schedule.vesting_duration as i128,
    )
    .ok_or(Error::Overflow)
}

/// Vested but not yet claimed.
///
/// Fails with `InvariantViolation` if `claimed` is outside `0..=total` or
/// ahead of what has vested.
pub fn claimable(schedule: &VestingSchedule, now: u64) -> Result<i128, Error> {
    if schedule.claimed < 0 || schedule.claimed > schedule.total_amount {
        return Err(Error::InvariantViolation);
    }
    let vested = vested_amount(schedule, now)?;
    if vested < schedule.claimed {
        return Err(Error::InvariantViolation);
    }
    Ok(vested - schedule.claimed)
}

/// Not yet claimed, whether vested or not.
pub fn outstanding(schedule: &VestingSchedule) -> i128 {
    schedule.total_amount - schedule.claimed
}
