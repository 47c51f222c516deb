//! # Types
//!
//! ## Bounty lifecycle
//!
//! ```text
//! Open ──► Judging ──► Completed
//!   │         └──────► Cancelled
//!   ├──────────────────► Completed
//!   └──────────────────► Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are terminal; every mutating entry point
//! rejects a terminal bounty with `InvalidState`.
//!
//! ## Submission lifecycle
//!
//! A submission starts `Pending` and leaves it exactly once, to `Winner`,
//! `Rejected` or `Refunded`. Its stake is released at that moment.

use soroban_sdk::{contracttype, Address, String};

use crate::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BountyState {
    /// Accepting submissions once funded.
    Open,
    /// Closed to submissions; waiting on a judge.
    Judging,
    Completed,
    Cancelled,
}

impl BountyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BountyState::Completed | BountyState::Cancelled)
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionStatus {
    Pending,
    Winner,
    Rejected,
    Refunded,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bounty {
    /// Sequential from 0.
    pub id: u64,
    /// Funds the reward and gets it back on cancellation.
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub reward_token: Address,
    pub reward_amount: i128,
    /// Escrowed from each submitter; zero means no stake.
    pub stake_required: i128,
    pub stake_token: Address,
    /// Submissions are accepted while `now <= deadline`.
    pub deadline: Option<u64>,
    pub state: BountyState,
    pub funded: bool,
    pub submission_count: u32,
    pub winner: Option<u64>,
    pub stakes_collected: i128,
    pub stakes_refunded: i128,
    pub stakes_slashed: i128,
}

impl Bounty {
    /// Stakes still held for this bounty's submissions.
    ///
    /// Fails with `InvariantViolation` if more was released than collected.
    pub fn escrowed_stakes(&self) -> Result<i128, Error> {
        let released = self
            .stakes_refunded
            .checked_add(self.stakes_slashed)
            .ok_or(Error::Overflow)?;
        if self.stakes_refunded < 0 || self.stakes_slashed < 0 || released > self.stakes_collected {
            return Err(Error::InvariantViolation);
        }
        Ok(self.stakes_collected - released)
    }

    pub fn deadline_passed(&self, now: u64) -> bool {
        matches!(self.deadline, Some(deadline) if now > deadline)
    }

    /// Open, funded and within its deadline.
    pub fn is_accepting(&self, now: u64) -> bool {
        self.state == BountyState::Open && self.funded && !self.deadline_passed(now)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Submission {
    /// Global sequence across all bounties.
    pub id: u64,
    pub bounty_id: u64,
    pub submitter: Address,
    pub file_uri: String,
    pub thumbnail_uri: String,
    pub status: SubmissionStatus,
    pub stake_amount: i128,
    pub submitted_at: u64,
}
