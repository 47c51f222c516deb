//! # Capability Registry Contract
//!
//! Reference implementation of the registry the incentive contracts consult
//! before any privileged write. The consumers only depend on the read-only
//! [`CapabilityRegistry`] interface, so any contract exposing `has_role` can
//! stand in for this one.
//!
//! | Phase      | Entry Point(s)                                             |
//! |------------|------------------------------------------------------------|
//! | Bootstrap  | [`CapabilityRegistryContract::init`]                       |
//! | Delegation | `grant_capability`, `revoke_capability`, `transfer_super_admin` |
//! | Queries    | `has_role`, `super_admin`                                  |
//!
//! Membership rules live in [`rbac`].

#![no_std]

use incentive_common::{Capability, CapabilityRegistry};
use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

pub mod rbac;


#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AccessDenied = 1,
    AlreadyInitialized = 2,
    NotInitialized = 3,
}

#[contract]
pub struct CapabilityRegistryContract;

#[contractimpl]
impl CapabilityRegistryContract {
    /// Set the super admin. Must be called exactly once after deployment.
    pub fn init(env: Env, super_admin: Address) -> Result<(), Error> {
        super_admin.require_auth();
        rbac::init_super_admin(&env, &super_admin)
    }

    /// Grant `capability` to `target`.
    ///
    /// - The super admin may grant anything.
    /// - Holders of `Admin` may grant everything except `Admin`.
    pub fn grant_capability(
        env: Env,
        caller: Address,
        target: Address,
        capability: Capability,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::grant(&env, &caller, &target, capability)
    }

    /// Revoke `capability` from `target`. Same authority rules as granting.
    pub fn revoke_capability(
        env: Env,
        caller: Address,
        target: Address,
        capability: Capability,
    ) -> Result<(), Error> {
        caller.require_auth();
        rbac::revoke(&env, &caller, &target, capability)
    }

    /// Hand the super admin seat to `new_super_admin`.
    pub fn transfer_super_admin(
        env: Env,
        current_super_admin: Address,
        new_super_admin: Address,
    ) -> Result<(), Error> {
        current_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin)
    }

    pub fn super_admin(env: Env) -> Option<Address> {
        rbac::get_super_admin(&env)
    }
}

#[contractimpl]
impl CapabilityRegistry for CapabilityRegistryContract {
    fn has_role(env: Env, account: Address, capability: Capability) -> bool {
        rbac::has_capability(&env, &account, capability)
    }
}
