// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # storagecmp Core
//!
//! Provider plan models and schema validation for storagecmp.
//!
//! This crate is the data contract of the pricing comparison content:
//!
//! - Typed, read-only records for providers, plans and costs
//! - A pure validator from raw JSON to those records
//! - Error types naming the offending field path
//!
//! ## Key Types
//!
//! ### Content Types
//! - [`ProviderCollection`] - Root of one content document
//! - [`Provider`] - A storage provider with plans and protocols
//! - [`Plan`] - A priced offering
//! - [`BaseCost`] / [`Cost`] - Base fee, single or multi-component
//! - [`StorageTerms`] / [`TrafficTerms`] - Included quota and overage
//! - [`Protocol`] - Storage access protocols
//!
//! ### Validation
//! - [`validate`] / [`validate_with`] - Raw JSON to [`ProviderCollection`]
//! - [`ValidationOptions`] - Unknown-field and protocol policies
//! - [`ValidationError`] - [`SchemaError`] or [`FormatError`] at a [`FieldPath`]
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({
//!     "providers": [{
//!         "name": "Acme",
//!         "url": "https://acme.example",
//!         "protocols": ["S3"],
//!         "plans": [{
//!             "name": "Basic",
//!             "baseCost": {"value": 5, "currency": "USD"},
//!             "storage": {"included": 100}
//!         }]
//!     }]
//! });
//!
//! let collection = storagecmp_core::validate(&doc).unwrap();
//! assert_eq!(collection.providers[0].plans[0].storage.included, 100.0);
//! ```

pub mod error;
pub mod models;
pub mod path;
pub mod validate;

pub use error::{FormatError, JsonType, SchemaError, ValidationError};
pub use path::{FieldPath, PathSegment};

pub use models::{
    // Content types
    BaseCost,
    Cost,
    OverageTerm,
    Plan,
    Protocol,
    Provider,
    ProviderCollection,
    ProviderUrl,
    StorageTerms,
    TrafficCost,
    TrafficKind,
    TrafficOverage,
    TrafficTerms,
    UnknownProtocol,
};

pub use validate::{
    validate, validate_with, ProtocolPolicy, UnknownFieldPolicy, ValidationOptions,
};
