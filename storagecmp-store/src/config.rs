//! Configuration management.
//!
//! `storagecmp.json` is the only configuration source: where content lives,
//! which files form the collection, and the validation policy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storagecmp_core::ValidationOptions;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "storagecmp.json";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Content collection settings.
    #[serde(default)]
    pub content: ContentConfig,
    /// Validation policy.
    #[serde(default)]
    pub validation: ValidationOptions,
    /// Directory the configuration was loaded from.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Where content files are found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    /// Content root, relative to the configuration file.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
    /// Collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Glob pattern of data files, relative to `dir`.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_collection() -> String {
    "storageProviders".to_string()
}

fn default_source() -> String {
    "data/**/*.json".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            collection: default_collection(),
            source: default_source(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Loads configuration from the given path or the default one.
    pub async fn load(path: Option<&Path>) -> Result<Self, StoreError> {
        match path {
            Some(path) => Self::load_from(path).await,
            None => Self::load_from(&Self::default_path()).await,
        }
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults, anchored at the file's directory.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self {
                base_dir: Some(base_dir),
                ..Self::default()
            });
        }

        let mut config: Config = load_json(path)
            .await
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        config.base_dir = Some(base_dir);

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Returns the content root, resolved against the configuration directory.
    pub fn content_root(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) if self.content.dir.is_relative() => base.join(&self.content.dir),
            _ => self.content.dir.clone(),
        }
    }

    /// Returns the validation options.
    pub fn validation_options(&self) -> ValidationOptions {
        self.validation
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storagecmp_core::{ProtocolPolicy, UnknownFieldPolicy};
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.collection, "storageProviders");
        assert_eq!(config.content.source, "data/**/*.json");
        assert_eq!(config.validation.unknown_fields, UnknownFieldPolicy::Reject);
        assert_eq!(config.validation.protocols, ProtocolPolicy::Strict);
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults_at_file_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config.content, ContentConfig::default());
        assert_eq!(config.content_root(), temp_dir.path().join("content"));
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(
            &path,
            r#"{"content": {"dir": "site"}, "validation": {"protocols": "open"}}"#,
        )
        .await
        .unwrap();

        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config.content.dir, PathBuf::from("site"));
        assert_eq!(config.content.source, "data/**/*.json");
        assert_eq!(config.validation.protocols, ProtocolPolicy::Open);
        assert_eq!(config.validation.unknown_fields, UnknownFieldPolicy::Reject);
        assert_eq!(config.content_root(), temp_dir.path().join("site"));
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.validation = ValidationOptions::lenient();
        config.save_to(&path).await.unwrap();

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded.validation, ValidationOptions::lenient());
        assert_eq!(loaded.content, config.content);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, r#"{"validation": {"protocols": "sometimes"}}"#)
            .await
            .unwrap();

        let err = Config::load_from(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_content_dir_is_kept() {
        let mut config = Config::default();
        config.content.dir = PathBuf::from("/srv/content");
        config.base_dir = Some(PathBuf::from("/etc"));
        assert_eq!(config.content_root(), PathBuf::from("/srv/content"));
    }
}
