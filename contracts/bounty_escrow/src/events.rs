//! Every event is published under `(symbol, bounty_id)` so indexers can
//! follow one bounty without decoding payloads.
//!
//! `winner` doubles as the contribution-completion signal consumed off-chain.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyCreated {
    pub bounty_id: u64,
    pub creator: Address,
    pub reward_token: Address,
    pub reward_amount: i128,
    pub stake_required: i128,
    pub deadline: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyFunded {
    pub bounty_id: u64,
    pub funder: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionReceived {
    pub bounty_id: u64,
    pub submission_id: u64,
    pub submitter: Address,
    pub stake_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JudgingStarted {
    pub bounty_id: u64,
    pub submission_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinnerSelected {
    pub bounty_id: u64,
    pub submission_id: u64,
    pub submitter: Address,
    pub judge: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyPaid {
    pub bounty_id: u64,
    pub recipient: Address,
    pub reward_amount: i128,
    pub stake_refund: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRefunded {
    pub bounty_id: u64,
    pub submission_id: u64,
    pub submitter: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeSlashed {
    pub bounty_id: u64,
    pub submission_id: u64,
    pub submitter: Address,
    pub amount: i128,
    pub destination: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionRejected {
    pub bounty_id: u64,
    pub submission_id: u64,
    pub judge: Address,
    pub slashed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyCancelled {
    pub bounty_id: u64,
    pub reward_refunded: i128,
    pub stakes_refunded: i128,
}

pub fn emit_bounty_created(env: &Env, data: BountyCreated) {
    env.events()
        .publish((symbol_short!("bnty_new"), data.bounty_id), data);
}

pub fn emit_bounty_funded(env: &Env, data: BountyFunded) {
    env.events()
        .publish((symbol_short!("bnty_fund"), data.bounty_id), data);
}

pub fn emit_submission_received(env: &Env, data: SubmissionReceived) {
    env.events()
        .publish((symbol_short!("submitted"), data.bounty_id), data);
}

pub fn emit_judging_started(env: &Env, bounty_id: u64, submission_count: u32) {
    let data = JudgingStarted {
        bounty_id,
        submission_count,
    };
    env.events()
        .publish((symbol_short!("judging"), bounty_id), data);
}

pub fn emit_winner_selected(env: &Env, data: WinnerSelected) {
    env.events()
        .publish((symbol_short!("winner"), data.bounty_id), data);
}

pub fn emit_bounty_paid(env: &Env, data: BountyPaid) {
    env.events()
        .publish((symbol_short!("paid"), data.bounty_id), data);
}

pub fn emit_stake_refunded(env: &Env, data: StakeRefunded) {
    env.events()
        .publish((symbol_short!("stk_rfnd"), data.bounty_id), data);
}

pub fn emit_stake_slashed(env: &Env, data: StakeSlashed) {
    env.events()
        .publish((symbol_short!("stk_slash"), data.bounty_id), data);
}

pub fn emit_submission_rejected(env: &Env, data: SubmissionRejected) {
    env.events()
        .publish((symbol_short!("rejected"), data.bounty_id), data);
}

pub fn emit_bounty_cancelled(env: &Env, data: BountyCancelled) {
    env.events()
        .publish((symbol_short!("cancelled"), data.bounty_id), data);
}

pub fn emit_config_updated(env: &Env, by: Address) {
    env.events().publish((symbol_short!("cfg_upd"),), by);
}
