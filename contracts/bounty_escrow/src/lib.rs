//! # Bounty Escrow Contract
//!
//! Holds a bounty's reward and every submitter's stake until the bounty is
//! settled, then pays the winner and returns or slashes the rest.
//!
//! | Phase      | Entry Point(s)                                                      |
//! |------------|---------------------------------------------------------------------|
//! | Bootstrap  | `__constructor(deployer)`, [`BountyEscrow::init`] (deployer), `update_config` |
//! | Setup      | `create_bounty` (BountyAdmin), `fund_bounty` (creator)              |
//! | Submission | `submit_work`                                                       |
//! | Judging    | `start_judging` (BountyAdmin), `select_winner`, `reject_submission` (Judge) |
//! | Exit       | `cancel_bounty` (BountyAdmin)                                       |
//! | Queries    | `bounties`, `submissions`, `get_bounty_submissions`, `is_bounty_open`, `bounty_count`, `escrowed_stakes` |
//!
//! ## Stake conservation
//!
//! For every bounty `stakes_refunded + stakes_slashed + escrowed ==
//! stakes_collected`. Settling a bounty (winner or cancellation) releases
//! every stake still pending, so a terminal bounty escrows nothing.

#![no_std]

use incentive_common::{has_capability, Capability};
use soroban_sdk::{
    contract, contracterror, contractimpl, log, token, Address, Env, String, Vec,
};

mod config;
pub mod events;
mod storage;
mod types;


pub use config::EscrowConfig;
use events::{
    BountyCancelled, BountyCreated, BountyFunded, BountyPaid, StakeRefunded, StakeSlashed,
    SubmissionReceived, SubmissionRejected, WinnerSelected,
};
pub use types::{Bounty, BountyState, Submission, SubmissionStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 3,
    InvalidAmount = 4,
    InvalidConfig = 5,
    NotFound = 6,
    InvalidState = 7,
    AlreadyFunded = 8,
    BountyNotOpen = 9,
    DeadlinePassed = 10,
    SubmissionLimitReached = 11,
    InvariantViolation = 12,
    Overflow = 13,
}

#[contract]
pub struct BountyEscrow;

#[contractimpl]
impl BountyEscrow {
    // ─────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────

    /// Runs once at deployment and records who may call `init`.
    pub fn __constructor(env: Env, deployer: Address) {
        storage::set_deployer(&env, &deployer);
    }

    /// Store the escrow configuration. Must be called exactly once, by the deployer.
    pub fn init(env: Env, config: EscrowConfig) -> Result<(), Error> {
        storage::get_deployer(&env)?.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config.validate()?;
        storage::set_config(&env, &config);
        Ok(())
    }

    /// Replace the configuration. `caller` must hold `Admin`.
    ///
    /// A lower submission cap only affects future submissions.
    pub fn update_config(env: Env, caller: Address, config: EscrowConfig) -> Result<(), Error> {
        caller.require_auth();
        let current = storage::get_config(&env)?;
        Self::require_capability(&env, &current, &caller, Capability::Admin)?;
        config.validate()?;
        storage::set_config(&env, &config);
        events::emit_config_updated(&env, caller);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<EscrowConfig, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Bounty setup
    // ─────────────────────────────────────────────────────────

    /// Register a new, unfunded bounty. `creator` must hold `BountyAdmin`.
    ///
    /// Returns the bounty id.
    #[allow(clippy::too_many_arguments)]
    pub fn create_bounty(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        reward_token: Address,
        reward_amount: i128,
        stake_required: i128,
        stake_token: Address,
        deadline: Option<u64>,
    ) -> Result<u64, Error> {
        creator.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &creator, Capability::BountyAdmin)?;

        if reward_amount <= 0 || stake_required < 0 {
            return Err(Error::InvalidAmount);
        }
        if let Some(deadline) = deadline {
            if deadline <= env.ledger().timestamp() {
                return Err(Error::DeadlinePassed);
            }
        }

        let id = storage::next_bounty_id(&env)?;
        let bounty = Bounty {
            id,
            creator: creator.clone(),
            title,
            description,
            reward_token: reward_token.clone(),
            reward_amount,
            stake_required,
            stake_token,
            deadline,
            state: BountyState::Open,
            funded: false,
            submission_count: 0,
            winner: None,
            stakes_collected: 0,
            stakes_refunded: 0,
            stakes_slashed: 0,
        };
        storage::save_bounty(&env, &bounty);

        events::emit_bounty_created(
            &env,
            BountyCreated {
                bounty_id: id,
                creator,
                reward_token,
                reward_amount,
                stake_required,
                deadline,
            },
        );
        Ok(id)
    }

    /// Pull the reward from the bounty's creator into escrow.
    pub fn fund_bounty(env: Env, bounty_id: u64) -> Result<(), Error> {
        let mut bounty = storage::load_bounty(&env, bounty_id)?;
        bounty.creator.require_auth();
        if bounty.state != BountyState::Open {
            return Err(Error::InvalidState);
        }
        if bounty.funded {
            return Err(Error::AlreadyFunded);
        }

        bounty.funded = true;
        storage::save_bounty(&env, &bounty);

        token::Client::new(&env, &bounty.reward_token).transfer(
            &bounty.creator,
            &env.current_contract_address(),
            &bounty.reward_amount,
        );

        events::emit_bounty_funded(
            &env,
            BountyFunded {
                bounty_id,
                funder: bounty.creator,
                amount: bounty.reward_amount,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Submissions
    // ─────────────────────────────────────────────────────────

    /// Submit work to an open, funded bounty, escrowing the required stake.
    ///
    /// Returns the submission id.
    pub fn submit_work(
        env: Env,
        submitter: Address,
        bounty_id: u64,
        file_uri: String,
        thumbnail_uri: String,
    ) -> Result<u64, Error> {
        submitter.require_auth();
        let config = storage::get_config(&env)?;
        let mut bounty = storage::load_bounty(&env, bounty_id)?;
        let now = env.ledger().timestamp();

        if bounty.state.is_terminal() {
            return Err(Error::InvalidState);
        }
        if bounty.state != BountyState::Open || !bounty.funded {
            return Err(Error::BountyNotOpen);
        }
        if bounty.deadline_passed(now) {
            return Err(Error::DeadlinePassed);
        }
        if bounty.submission_count >= config.max_submissions_per_bounty {
            return Err(Error::SubmissionLimitReached);
        }

        let ordinal = bounty.submission_count;
        let submission = Submission {
            id: storage::next_submission_id(&env)?,
            bounty_id,
            submitter: submitter.clone(),
            file_uri,
            thumbnail_uri,
            status: SubmissionStatus::Pending,
            stake_amount: bounty.stake_required,
            submitted_at: now,
        };
        bounty.submission_count = ordinal.checked_add(1).ok_or(Error::Overflow)?;
        bounty.stakes_collected = bounty
            .stakes_collected
            .checked_add(submission.stake_amount)
            .ok_or(Error::Overflow)?;

        storage::save_submission(&env, &submission);
        storage::link_submission(&env, bounty_id, ordinal, submission.id);
        storage::save_bounty(&env, &bounty);

        if submission.stake_amount > 0 {
            token::Client::new(&env, &bounty.stake_token).transfer(
                &submitter,
                &env.current_contract_address(),
                &submission.stake_amount,
            );
        }

        events::emit_submission_received(
            &env,
            SubmissionReceived {
                bounty_id,
                submission_id: submission.id,
                submitter,
                stake_amount: submission.stake_amount,
            },
        );
        Ok(submission.id)
    }

    // ─────────────────────────────────────────────────────────
    // Judging
    // ─────────────────────────────────────────────────────────

    /// Close an open bounty to new submissions. `admin` must hold `BountyAdmin`.
    pub fn start_judging(env: Env, admin: Address, bounty_id: u64) -> Result<(), Error> {
        admin.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &admin, Capability::BountyAdmin)?;

        let mut bounty = storage::load_bounty(&env, bounty_id)?;
        if bounty.state != BountyState::Open || !bounty.funded || bounty.submission_count == 0 {
            return Err(Error::InvalidState);
        }
        bounty.state = BountyState::Judging;
        storage::save_bounty(&env, &bounty);

        events::emit_judging_started(&env, bounty_id, bounty.submission_count);
        Ok(())
    }

    /// Settle a bounty in favour of one submission. `judge` must hold `Judge`.
    ///
    /// The winner receives the reward plus their own stake; every other
    /// pending stake is refunded. Returns the amount paid to the winner.
    pub fn select_winner(
        env: Env,
        judge: Address,
        bounty_id: u64,
        submission_id: u64,
    ) -> Result<i128, Error> {
        judge.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &judge, Capability::Judge)?;

        let mut bounty = storage::load_bounty(&env, bounty_id)?;
        if bounty.state.is_terminal() || !bounty.funded {
            return Err(Error::InvalidState);
        }
        let mut winner = storage::load_submission(&env, submission_id)?;
        if winner.bounty_id != bounty_id {
            return Err(Error::NotFound);
        }
        if winner.status != SubmissionStatus::Pending {
            return Err(Error::InvalidState);
        }

        let others = Self::pending_submissions(&env, &bounty, Some(submission_id))?;
        let released = Self::total_stake(&others)?
            .checked_add(winner.stake_amount)
            .ok_or(Error::Overflow)?;
        bounty.stakes_refunded = bounty
            .stakes_refunded
            .checked_add(released)
            .ok_or(Error::Overflow)?;
        bounty.state = BountyState::Completed;
        bounty.winner = Some(submission_id);
        Self::require_settled(&env, &bounty)?;

        winner.status = SubmissionStatus::Winner;
        storage::save_submission(&env, &winner);
        for mut other in others.iter() {
            other.status = SubmissionStatus::Refunded;
            storage::save_submission(&env, &other);
        }
        storage::save_bounty(&env, &bounty);

        let contract = env.current_contract_address();
        token::Client::new(&env, &bounty.reward_token).transfer(
            &contract,
            &winner.submitter,
            &bounty.reward_amount,
        );
        let stake_client = token::Client::new(&env, &bounty.stake_token);
        if winner.stake_amount > 0 {
            stake_client.transfer(&contract, &winner.submitter, &winner.stake_amount);
        }
        for other in others.iter() {
            if other.stake_amount > 0 {
                stake_client.transfer(&contract, &other.submitter, &other.stake_amount);
            }
        }

        events::emit_winner_selected(
            &env,
            WinnerSelected {
                bounty_id,
                submission_id,
                submitter: winner.submitter.clone(),
                judge,
            },
        );
        events::emit_bounty_paid(
            &env,
            BountyPaid {
                bounty_id,
                recipient: winner.submitter.clone(),
                reward_amount: bounty.reward_amount,
                stake_refund: winner.stake_amount,
            },
        );
        Self::emit_refunds(&env, &others);

        bounty
            .reward_amount
            .checked_add(winner.stake_amount)
            .ok_or(Error::Overflow)
    }

    /// Reject one pending submission, refunding its stake or slashing it to
    /// the configured destination. `judge` must hold `Judge`.
    ///
    /// The bounty itself stays in its current state.
    pub fn reject_submission(
        env: Env,
        judge: Address,
        submission_id: u64,
        slash_stake: bool,
    ) -> Result<(), Error> {
        judge.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &judge, Capability::Judge)?;

        let mut submission = storage::load_submission(&env, submission_id)?;
        let mut bounty = storage::load_bounty(&env, submission.bounty_id)?;
        if bounty.state.is_terminal() || submission.status != SubmissionStatus::Pending {
            return Err(Error::InvalidState);
        }

        let amount = submission.stake_amount;
        if slash_stake {
            bounty.stakes_slashed = bounty
                .stakes_slashed
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
        } else {
            bounty.stakes_refunded = bounty
                .stakes_refunded
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
        }
        Self::checked_escrow(&env, &bounty)?;

        submission.status = SubmissionStatus::Rejected;
        storage::save_submission(&env, &submission);
        storage::save_bounty(&env, &bounty);

        let recipient = if slash_stake {
            config.slash_destination.clone()
        } else {
            submission.submitter.clone()
        };
        if amount > 0 {
            token::Client::new(&env, &bounty.stake_token).transfer(
                &env.current_contract_address(),
                &recipient,
                &amount,
            );
        }

        events::emit_submission_rejected(
            &env,
            SubmissionRejected {
                bounty_id: bounty.id,
                submission_id,
                judge,
                slashed: slash_stake,
            },
        );
        if amount > 0 {
            if slash_stake {
                events::emit_stake_slashed(
                    &env,
                    StakeSlashed {
                        bounty_id: bounty.id,
                        submission_id,
                        submitter: submission.submitter,
                        amount,
                        destination: recipient,
                    },
                );
            } else {
                events::emit_stake_refunded(
                    &env,
                    StakeRefunded {
                        bounty_id: bounty.id,
                        submission_id,
                        submitter: submission.submitter,
                        amount,
                    },
                );
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Cancellation
    // ─────────────────────────────────────────────────────────

    /// Abandon a bounty, returning the reward to its creator and every
    /// pending stake to its submitter. `admin` must hold `BountyAdmin`.
    pub fn cancel_bounty(env: Env, admin: Address, bounty_id: u64) -> Result<(), Error> {
        admin.require_auth();
        let config = storage::get_config(&env)?;
        Self::require_capability(&env, &config, &admin, Capability::BountyAdmin)?;

        let mut bounty = storage::load_bounty(&env, bounty_id)?;
        if bounty.state.is_terminal() {
            return Err(Error::InvalidState);
        }

        let pending = Self::pending_submissions(&env, &bounty, None)?;
        let stakes_refunded = Self::total_stake(&pending)?;
        bounty.stakes_refunded = bounty
            .stakes_refunded
            .checked_add(stakes_refunded)
            .ok_or(Error::Overflow)?;
        bounty.state = BountyState::Cancelled;
        Self::require_settled(&env, &bounty)?;
        let reward_refunded = if bounty.funded { bounty.reward_amount } else { 0 };

        for mut submission in pending.iter() {
            submission.status = SubmissionStatus::Refunded;
            storage::save_submission(&env, &submission);
        }
        storage::save_bounty(&env, &bounty);

        let contract = env.current_contract_address();
        if reward_refunded > 0 {
            token::Client::new(&env, &bounty.reward_token).transfer(
                &contract,
                &bounty.creator,
                &reward_refunded,
            );
        }
        let stake_client = token::Client::new(&env, &bounty.stake_token);
        for submission in pending.iter() {
            if submission.stake_amount > 0 {
                stake_client.transfer(&contract, &submission.submitter, &submission.stake_amount);
            }
        }

        Self::emit_refunds(&env, &pending);
        events::emit_bounty_cancelled(
            &env,
            BountyCancelled {
                bounty_id,
                reward_refunded,
                stakes_refunded,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn bounties(env: Env, bounty_id: u64) -> Result<Bounty, Error> {
        storage::load_bounty(&env, bounty_id)
    }

    pub fn submissions(env: Env, submission_id: u64) -> Result<Submission, Error> {
        storage::load_submission(&env, submission_id)
    }

    /// Every submission of a bounty, in submission order.
    pub fn get_bounty_submissions(env: Env, bounty_id: u64) -> Result<Vec<Submission>, Error> {
        let bounty = storage::load_bounty(&env, bounty_id)?;
        let mut result = Vec::new(&env);
        for ordinal in 0..bounty.submission_count {
            result.push_back(storage::linked_submission(&env, bounty_id, ordinal)?);
        }
        Ok(result)
    }

    /// Open, funded and not past its deadline.
    pub fn is_bounty_open(env: Env, bounty_id: u64) -> Result<bool, Error> {
        let bounty = storage::load_bounty(&env, bounty_id)?;
        Ok(bounty.is_accepting(env.ledger().timestamp()))
    }

    pub fn bounty_count(env: Env) -> u64 {
        storage::bounty_count(&env)
    }

    pub fn escrowed_stakes(env: Env, bounty_id: u64) -> Result<i128, Error> {
        let bounty = storage::load_bounty(&env, bounty_id)?;
        Self::checked_escrow(&env, &bounty)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_capability(
        env: &Env,
        config: &EscrowConfig,
        caller: &Address,
        capability: Capability,
    ) -> Result<(), Error> {
        if has_capability(env, &config.registry, caller, capability) {
            Ok(())
        } else {
            Err(Error::AccessDenied)
        }
    }

    /// Pending submissions of `bounty`, skipping `except`.
    fn pending_submissions(
        env: &Env,
        bounty: &Bounty,
        except: Option<u64>,
    ) -> Result<Vec<Submission>, Error> {
        let mut pending = Vec::new(env);
        for ordinal in 0..bounty.submission_count {
            let submission = storage::linked_submission(env, bounty.id, ordinal)?;
            if submission.status == SubmissionStatus::Pending && Some(submission.id) != except {
                pending.push_back(submission);
            }
        }
        Ok(pending)
    }

    fn total_stake(submissions: &Vec<Submission>) -> Result<i128, Error> {
        let mut total: i128 = 0;
        for submission in submissions.iter() {
            total = total
                .checked_add(submission.stake_amount)
                .ok_or(Error::Overflow)?;
        }
        Ok(total)
    }

    fn checked_escrow(env: &Env, bounty: &Bounty) -> Result<i128, Error> {
        bounty.escrowed_stakes().map_err(|err| {
            log!(env, "stake conservation violated", bounty.id);
            err
        })
    }

    /// A settled bounty must not keep any stake in escrow.
    fn require_settled(env: &Env, bounty: &Bounty) -> Result<(), Error> {
        let escrowed = Self::checked_escrow(env, bounty)?;
        if escrowed != 0 {
            log!(env, "stakes left in escrow after settlement", bounty.id, escrowed);
            return Err(Error::InvariantViolation);
        }
        Ok(())
    }

    fn emit_refunds(env: &Env, refunded: &Vec<Submission>) {
        for submission in refunded.iter() {
            if submission.stake_amount > 0 {
                events::emit_stake_refunded(
                    env,
                    StakeRefunded {
                        bounty_id: submission.bounty_id,
                        submission_id: submission.id,
                        submitter: submission.submitter,
                        amount: submission.stake_amount,
                    },
                );
            }
        }
    }
}
