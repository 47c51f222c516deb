//! Escrow configuration, written to instance storage by the deployer's `init`.

use soroban_sdk::{contracttype, Address};

use crate::Error;

/// Largest submission cap the config accepts. Settlement refunds every
/// pending submission in one invocation, two ledger writes each, and must
/// stay inside the per-transaction write-entry limit.
pub const MAX_SUBMISSIONS_PER_BOUNTY: u32 = 10;

pub const DEFAULT_MAX_SUBMISSIONS_PER_BOUNTY: u32 = MAX_SUBMISSIONS_PER_BOUNTY;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    pub registry: Address,
    /// Receives stakes of submissions rejected with a slash.
    pub slash_destination: Address,
    pub max_submissions_per_bounty: u32,
}

impl EscrowConfig {
    pub fn default_for(registry: Address, slash_destination: Address) -> Self {
        Self {
            registry,
            slash_destination,
            max_submissions_per_bounty: DEFAULT_MAX_SUBMISSIONS_PER_BOUNTY,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_submissions_per_bounty == 0
            || self.max_submissions_per_bounty > MAX_SUBMISSIONS_PER_BOUNTY
        {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}
