//! Vault configuration, written to instance storage by the deployer's `init`.

use incentive_common::{math::MAX_BPS, time::DAY};
use soroban_sdk::{contracttype, Address};

use crate::Error;

/// How long the locked half of a reward stays locked.
pub const DEFAULT_LOCK_DURATION: u64 = 90 * DAY;

/// Share of the remaining lock forfeited on an early, slashed claim.
pub const DEFAULT_EARLY_CLAIM_PENALTY_BPS: u32 = 2_500;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Token paid out by the vault.
    pub token: Address,
    /// Contract answering `has_role` for capability checks.
    pub registry: Address,
    pub lock_duration: u64,
    /// Must be in `1..=10_000` so an early release is always strictly
    /// smaller than what was locked.
    pub early_claim_penalty_bps: u32,
    /// Receives slashed amounts.
    pub slash_destination: Address,
}

impl VaultConfig {
    /// Configuration with the default lock duration and penalty.
    pub fn default_for(token: Address, registry: Address, slash_destination: Address) -> Self {
        Self {
            token,
            registry,
            lock_duration: DEFAULT_LOCK_DURATION,
            early_claim_penalty_bps: DEFAULT_EARLY_CLAIM_PENALTY_BPS,
            slash_destination,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.lock_duration == 0 {
            return Err(Error::InvalidConfig);
        }
        if self.early_claim_penalty_bps == 0 || self.early_claim_penalty_bps > MAX_BPS {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}
