//! Validated content and the store that publishes it.
//!
//! A [`ContentSet`] is immutable once built. The [`ContentStore`] swaps whole
//! sets on reload and notifies subscribers, so readers never see a partially
//! loaded collection.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use storagecmp_core::{Plan, Provider, ProviderCollection};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::loader::ContentLoader;

// ============================================================================
// Content Set
// ============================================================================

/// One validated content file.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file.
    pub path: PathBuf,
    /// Validated content.
    pub collection: ProviderCollection,
}

/// All validated documents of a collection.
#[derive(Debug, Clone)]
pub struct ContentSet {
    /// Collection name.
    pub collection: String,
    /// Documents in path order.
    pub documents: Vec<Document>,
    /// When the set was built.
    pub loaded_at: DateTime<Utc>,
}

impl ContentSet {
    /// Returns all providers across documents, in document order.
    pub fn providers(&self) -> impl Iterator<Item = &Provider> {
        self.documents
            .iter()
            .flat_map(|d| d.collection.providers.iter())
    }

    /// Returns every plan together with its provider.
    pub fn plans(&self) -> impl Iterator<Item = (&Provider, &Plan)> {
        self.providers()
            .flat_map(|provider| provider.plans.iter().map(move |plan| (provider, plan)))
    }

    /// Returns the number of providers.
    pub fn provider_count(&self) -> usize {
        self.documents.iter().map(|d| d.collection.len()).sum()
    }

    /// Returns the number of plans.
    pub fn plan_count(&self) -> usize {
        self.documents.iter().map(|d| d.collection.plan_count()).sum()
    }

    /// Looks up a provider by name.
    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers().find(|p| p.name == name)
    }
}

// ============================================================================
// Content Store
// ============================================================================

/// Holds the current content set and reloads it on demand.
///
/// Observable via a watch channel carrying a version counter.
pub struct ContentStore {
    loader: ContentLoader,
    current: RwLock<Option<Arc<ContentSet>>>,
    notify: watch::Sender<u64>,
}

impl ContentStore {
    /// Creates an empty store.
    pub fn new(loader: ContentLoader) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            loader,
            current: RwLock::new(None),
            notify,
        }
    }

    /// Returns the loader.
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Returns the current content set, if one was loaded.
    pub async fn current(&self) -> Option<Arc<ContentSet>> {
        self.current.read().await.clone()
    }

    /// Returns the version of the current set (0 before the first load).
    pub fn version(&self) -> u64 {
        *self.notify.borrow()
    }

    /// Subscribes to content changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Reloads content from disk.
    ///
    /// On failure the previous set stays current and the error is returned.
    pub async fn reload(&self) -> Result<Arc<ContentSet>, StoreError> {
        let content = match self.loader.load_content().await {
            Ok(content) => Arc::new(content),
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping previous content");
                return Err(e);
            }
        };

        *self.current.write().await = Some(Arc::clone(&content));
        self.notify.send_modify(|version| *version += 1);

        info!(
            providers = content.provider_count(),
            plans = content.plan_count(),
            version = self.version(),
            "Content published"
        );
        Ok(content)
    }
}

// ============================================================================
// Tests
// ============================================================================
