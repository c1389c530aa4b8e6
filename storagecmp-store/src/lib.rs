// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # storagecmp Store
//!
//! Configuration and content loading for storagecmp.
//!
//! This crate provides:
//!
//! - **Config**: the single `storagecmp.json` configuration source
//! - **ContentLoader**: discovers, reads and validates data files concurrently
//! - **ContentStore**: publishes the current read-only content set with
//!   change notifications
//! - **Persistence**: async JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use storagecmp_store::{Config, ContentLoader, ContentStore};
//!
//! let config = Config::load(None).await?;
//! let store = ContentStore::new(ContentLoader::from_config(&config));
//!
//! // Fails if any content file is invalid
//! let content = store.reload().await?;
//! println!("{} providers", content.provider_count());
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod loader;
pub mod persistence;

pub use config::{Config, ContentConfig, CONFIG_FILE_NAME};
pub use content::{ContentSet, ContentStore, Document};
pub use error::StoreError;
pub use loader::{load_file, relative_path, ContentLoader, FileOutcome, LoadReport};
pub use persistence::{load_json, read_document, save_json};
