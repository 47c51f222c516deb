//! # Capabilities
//!
//! Privileged operations in the incentive contracts are gated by a named
//! capability. The contracts never own the membership data: each one stores
//! the address of a registry contract in its configuration and asks it
//! through [`CapabilityRegistryClient`].
//!
//! | Capability           | Gates                                                   |
//! |----------------------|---------------------------------------------------------|
//! | `Admin`              | `update_config` on every contract, registry delegation  |
//! | `Distributor`        | `reward_vault::distribute_reward`                       |
//! | `VestingAdmin`       | `stake_vesting::create_vesting_schedule`                |
//! | `ContributionOracle` | `stake_vesting::unlock_by_contribution`                 |
//! | `BountyAdmin`        | `create_bounty`, `start_judging`, `cancel_bounty`       |
//! | `Judge`              | `select_winner`, `reject_submission`                    |

use soroban_sdk::{contractclient, contracttype, Address, Env};

/// A named permission required to invoke a privileged operation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    Admin,
    Distributor,
    Judge,
    VestingAdmin,
    BountyAdmin,
    /// Relays bounty completions into early vesting unlocks.
    ContributionOracle,
}

/// Read-only interface every capability registry must expose.
#[contractclient(name = "CapabilityRegistryClient")]
pub trait CapabilityRegistry {
    /// Return `true` if `account` currently holds `capability`.
    fn has_role(env: Env, account: Address, capability: Capability) -> bool;
}

/// Ask the registry at `registry` whether `account` holds `capability`.
pub fn has_capability(env: &Env, registry: &Address, account: &Address, capability: Capability) -> bool {
    CapabilityRegistryClient::new(env, registry).has_role(account, &capability)
}
