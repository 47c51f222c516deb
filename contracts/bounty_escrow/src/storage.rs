//! # Storage
//!
//! ## Instance storage
//!
//! | Key               | Type           | Description                        |
//! |-------------------|----------------|------------------------------------|
//! | `Deployer`        | `Address`      | Only account allowed to call `init` |
//! | `Config`          | `EscrowConfig` | Registry, slash sink, caps         |
//! | `BountyCount`     | `u64`          | Next bounty id                     |
//! | `SubmissionCount` | `u64`          | Next submission id                 |
//!
//! ## Persistent storage
//!
//! | Key                          | Type         | Description                         |
//! |------------------------------|--------------|-------------------------------------|
//! | `Bounty(id)`                 | `Bounty`     | Bounty with its stake counters      |
//! | `Submission(id)`             | `Submission` | One submission                      |
//! | `BountySub(bounty, ordinal)` | `u64`        | Submission ids of a bounty in order |

use incentive_common::ttl;
use soroban_sdk::{contracttype, Address, Env};

use crate::config::EscrowConfig;
use crate::types::{Bounty, Submission};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Deployer,
    Config,
    BountyCount,
    SubmissionCount,
    Bounty(u64),
    Submission(u64),
    BountySub(u64, u32),
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

pub fn get_config(env: &Env) -> Result<EscrowConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &EscrowConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

// ── Counters ─────────────────────────────────────────────────────────

pub fn bounty_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::BountyCount)
        .unwrap_or(0)
}

/// Read and advance the bounty counter. Returns the id for the new bounty.
pub fn next_bounty_id(env: &Env) -> Result<u64, Error> {
    let current = bounty_count(env);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::BountyCount, &next);
    Ok(current)
}

/// Read and advance the global submission counter.
pub fn next_submission_id(env: &Env) -> Result<u64, Error> {
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::SubmissionCount)
        .unwrap_or(0);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::SubmissionCount, &next);
    Ok(current)
}

// ── Bounties ─────────────────────────────────────────────────────────

pub fn load_bounty(env: &Env, id: u64) -> Result<Bounty, Error> {
    let key = DataKey::Bounty(id);
    let bounty = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(bounty)
}

pub fn save_bounty(env: &Env, bounty: &Bounty) {
    let key = DataKey::Bounty(bounty.id);
    env.storage().persistent().set(&key, bounty);
    bump_persistent(env, &key);
}

// ── Submissions ──────────────────────────────────────────────────────

pub fn load_submission(env: &Env, id: u64) -> Result<Submission, Error> {
    let key = DataKey::Submission(id);
    let submission = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(submission)
}

pub fn save_submission(env: &Env, submission: &Submission) {
    let key = DataKey::Submission(submission.id);
    env.storage().persistent().set(&key, submission);
    bump_persistent(env, &key);
}

/// Record `submission_id` as the `ordinal`-th submission of `bounty_id`.
pub fn link_submission(env: &Env, bounty_id: u64, ordinal: u32, submission_id: u64) {
    let key = DataKey::BountySub(bounty_id, ordinal);
    env.storage().persistent().set(&key, &submission_id);
    bump_persistent(env, &key);
}

/// Submission at `ordinal` of `bounty_id`.
///
/// Every ordinal below `submission_count` is linked when the submission is
/// stored, so a missing link is an `InvariantViolation`.
pub fn linked_submission(env: &Env, bounty_id: u64, ordinal: u32) -> Result<Submission, Error> {
    let key = DataKey::BountySub(bounty_id, ordinal);
    let submission_id: u64 = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::InvariantViolation)?;
    bump_persistent(env, &key);
    load_submission(env, submission_id)
}
