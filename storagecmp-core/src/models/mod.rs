//! Domain models for storagecmp.
//!
//! Typed records of validated provider pricing content. They are produced by
//! [`crate::validate`] only and serialize back to the content format.
//!
//! ## Submodules
//!
//! - [`provider`] - ProviderCollection, Provider, ProviderUrl, Protocol
//! - [`plan`] - Plan, StorageTerms, TrafficTerms and overage terms
//! - [`cost`] - Cost, TrafficCost, BaseCost

mod cost;
mod plan;
mod provider;

pub use cost::{BaseCost, Cost, TrafficCost};
pub use plan::{OverageTerm, Plan, StorageTerms, TrafficKind, TrafficOverage, TrafficTerms};
pub use provider::{Protocol, Provider, ProviderCollection, ProviderUrl, UnknownProtocol};
#[cfg(test)]
mod serde_tests;
