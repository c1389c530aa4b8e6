//! File persistence helpers.
//!
//! Async JSON I/O shared by configuration and content loading.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// File Operations
// ============================================================================

/// Saves data to a pretty-printed JSON file.
///
/// Creates parent directories if they don't exist and writes atomically
/// (via temp file + rename).
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    Ok(data)
}

/// Reads a content file as an untyped JSON document.
///
/// Unlike [`load_json`], errors carry the file path.
pub async fn read_document(path: &Path) -> Result<Value, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load_json_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.json");

        let data = serde_json::json!({"key": "value", "n": 3});
        save_json(&file_path, &data).await.unwrap();

        let loaded: Value = load_json(&file_path).await.unwrap();
        assert_eq!(loaded, data);
        assert!(!file_path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deeply").join("nested").join("test.json");

        save_json(&nested, &serde_json::json!({})).await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn test_read_document_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = read_document(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(!err.is_content_error());
    }

    #[tokio::test]
    async fn test_read_document_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        tokio::fs::write(&path, "{\"providers\": [").await.unwrap();

        let err = read_document(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Syntax { .. }));
        assert!(err.is_content_error());
        assert!(err.to_string().contains("bad.json"));
    }
}
