//! # RBAC: capability grants
//!
//! ```text
//! SuperAdmin (implicitly holds every capability)
//!     └── Admin
//!           ├── Distributor
//!           ├── Judge
//!           ├── VestingAdmin
//!           ├── BountyAdmin
//!           └── ContributionOracle
//! ```
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super admin.
//! - `RbacKey::Grant(addr, capability)` → `bool`: present while granted.
//!
//! An address may hold any number of capabilities at once.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger              |
//! |--------------------|----------------------|
//! | `cap_set`          | Capability granted   |
//! | `cap_del`          | Capability revoked   |
//! | `super_set`        | Super admin replaced |
//!
//! ## Threat model notes
//!
//! - `Admin` holders cannot mint new `Admin` holders; only the super admin can.
//! - The super admin seat changes hands only through `transfer_super_admin`.

use incentive_common::{ttl, Capability};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    SuperAdmin,
    Grant(Address, Capability),
}

// ─────────────────────────────────────────────────────────
// Storage helpers (private)
// ─────────────────────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(ttl::INSTANCE_LIFETIME_THRESHOLD, ttl::INSTANCE_BUMP_AMOUNT);
}

fn store_grant(env: &Env, target: &Address, capability: Capability) {
    let key = RbacKey::Grant(target.clone(), capability);
    env.storage().persistent().set(&key, &true);
    env.storage().persistent().extend_ttl(
        &key,
        ttl::PERSISTENT_LIFETIME_THRESHOLD,
        ttl::PERSISTENT_BUMP_AMOUNT,
    );
}

fn clear_grant(env: &Env, target: &Address, capability: Capability) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Grant(target.clone(), capability));
}

fn is_granted(env: &Env, target: &Address, capability: Capability) -> bool {
    env.storage()
        .persistent()
        .has(&RbacKey::Grant(target.clone(), capability))
}

/// Read the super admin, returning `None` before init.
pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&RbacKey::SuperAdmin)
}

fn require_super_admin_set(env: &Env) -> Result<Address, Error> {
    let super_admin = get_super_admin(env).ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(super_admin)
}

// ─────────────────────────────────────────────────────────
// Initialisation
// ─────────────────────────────────────────────────────────

/// Set the initial super admin. Fails with `AlreadyInitialized` on a second call.
pub fn init_super_admin(env: &Env, super_admin: &Address) -> Result<(), Error> {
    if env.storage().instance().has(&RbacKey::SuperAdmin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&RbacKey::SuperAdmin, super_admin);
    bump_instance(env);
    emit_super_admin(env, super_admin, None);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Delegation
// ─────────────────────────────────────────────────────────

/// Fails with `AccessDenied` unless `caller` may hand out `capability`.
fn require_can_delegate(env: &Env, caller: &Address, capability: Capability) -> Result<(), Error> {
    let super_admin = require_super_admin_set(env)?;
    if *caller == super_admin {
        return Ok(());
    }
    if capability != Capability::Admin && is_granted(env, caller, Capability::Admin) {
        return Ok(());
    }
    Err(Error::AccessDenied)
}

/// Grant `capability` to `target`. Re-granting is a no-op apart from the event.
pub fn grant(env: &Env, caller: &Address, target: &Address, capability: Capability) -> Result<(), Error> {
    require_can_delegate(env, caller, capability)?;
    store_grant(env, target, capability);
    emit(env, symbol_short!("cap_set"), target, capability, caller);
    Ok(())
}

/// Revoke `capability` from `target`. Revoking an absent grant emits nothing.
pub fn revoke(env: &Env, caller: &Address, target: &Address, capability: Capability) -> Result<(), Error> {
    require_can_delegate(env, caller, capability)?;
    if is_granted(env, target, capability) {
        clear_grant(env, target, capability);
        emit(env, symbol_short!("cap_del"), target, capability, caller);
    }
    Ok(())
}

/// Move the super admin seat. The previous holder keeps no implicit rights.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) -> Result<(), Error> {
    let super_admin = require_super_admin_set(env)?;
    if *current != super_admin {
        return Err(Error::AccessDenied);
    }
    env.storage().instance().set(&RbacKey::SuperAdmin, new);
    emit_super_admin(env, new, Some(current.clone()));
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

/// Returns `true` if `account` is the super admin or has been granted `capability`.
pub fn has_capability(env: &Env, account: &Address, capability: Capability) -> bool {
    match get_super_admin(env) {
        Some(ref super_admin) if super_admin == account => true,
        Some(_) => is_granted(env, account, capability),
        None => false,
    }
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

/// Topic: `(event, target, capability_symbol)`, data: the caller.
fn emit(env: &Env, event: Symbol, target: &Address, capability: Capability, by: &Address) {
    env.events()
        .publish((event, target.clone(), capability_to_symbol(capability)), by.clone());
}

fn emit_super_admin(env: &Env, new: &Address, previous: Option<Address>) {
    env.events()
        .publish((symbol_short!("super_set"), new.clone()), previous);
}

fn capability_to_symbol(capability: Capability) -> Symbol {
    match capability {
        Capability::Admin => symbol_short!("admin"),
        Capability::Distributor => symbol_short!("distrib"),
        Capability::Judge => symbol_short!("judge"),
        Capability::VestingAdmin => symbol_short!("vest_adm"),
        Capability::BountyAdmin => symbol_short!("bnty_adm"),
        Capability::ContributionOracle => symbol_short!("contrib"),
    }
}
