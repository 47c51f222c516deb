//! # Incentive Common
//!
//! Pieces shared by every incentive contract in this workspace:
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`capability`] | `Capability` enum and the `CapabilityRegistry` interface   |
//! | [`math`]       | Checked basis-point and ratio arithmetic on `i128` amounts |
//! | [`time`]       | Ledger-second duration constants                           |
//! | [`ttl`]        | Storage TTL extension policy                               |
//!
//! Nothing in here touches contract storage; each contract owns its own keys.

#![no_std]

pub mod capability;
pub mod math;
pub mod time;
pub mod ttl;

pub use capability::{has_capability, Capability, CapabilityRegistry, CapabilityRegistryClient};
