//! Content discovery and loading.
//!
//! Finds the data files of a collection, reads and validates them
//! concurrently, and reports the outcome per file. Files are independent:
//! one bad file never affects how another is read.

use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use futures::future::join_all;
use storagecmp_core::{validate_with, ProviderCollection, ValidationOptions};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::{ContentSet, Document};
use crate::error::StoreError;
use crate::persistence::read_document;

// ============================================================================
// Load Report
// ============================================================================

/// Outcome of loading one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// The file.
    pub path: PathBuf,
    /// Validated content or the first failure.
    pub result: Result<ProviderCollection, StoreError>,
}

impl FileOutcome {
    /// Returns true if the file validated.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file results of a load, in path order.
#[derive(Debug)]
pub struct LoadReport {
    /// Collection name.
    pub collection: String,
    /// One entry per discovered file.
    pub files: Vec<FileOutcome>,
}

impl LoadReport {
    /// Returns true if every file validated.
    pub fn is_ok(&self) -> bool {
        self.files.iter().all(FileOutcome::is_ok)
    }

    /// Returns the failed files.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| !f.is_ok())
    }

    /// Returns the number of failed files.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Converts the report into a content set.
    ///
    /// Fails if any file failed: partial content is never published.
    pub fn into_content_set(self) -> Result<ContentSet, StoreError> {
        let total = self.files.len();
        let failed = self.failure_count();
        if failed > 0 {
            return Err(StoreError::InvalidContent { failed, total });
        }

        let documents = self
            .files
            .into_iter()
            .filter_map(|f| {
                f.result.ok().map(|collection| Document {
                    path: f.path,
                    collection,
                })
            })
            .collect();

        Ok(ContentSet {
            collection: self.collection,
            documents,
            loaded_at: Utc::now(),
        })
    }
}

// ============================================================================
// Content Loader
// ============================================================================

/// Loads the data files of one collection.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
    source: String,
    collection: String,
    options: ValidationOptions,
}

impl ContentLoader {
    /// Creates a loader for files matching `source` under `root`.
    pub fn new(root: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            source: source.into(),
            collection: crate::config::ContentConfig::default().collection,
            options: ValidationOptions::default(),
        }
    }

    /// Creates a loader from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.content_root(),
            source: config.content.source.clone(),
            collection: config.content.collection.clone(),
            options: config.validation_options(),
        }
    }

    /// Sets the validation options.
    #[must_use]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the full glob pattern searched.
    pub fn pattern(&self) -> String {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        format!("{}/{}", root.trim_end_matches('/'), self.source)
    }

    /// Returns the matching files, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>, StoreError> {
        let pattern = self.pattern();
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        debug!(pattern = %pattern, files = paths.len(), "Discovered content files");
        Ok(paths)
    }

    /// Loads and validates every matching file.
    ///
    /// Returns an error only when discovery itself fails or nothing matches;
    /// per-file failures are in the report.
    pub async fn load(&self) -> Result<LoadReport, StoreError> {
        let paths = self.discover()?;
        if paths.is_empty() {
            return Err(StoreError::NoContent {
                pattern: self.pattern(),
            });
        }

        let options = self.options;
        let results = join_all(paths.iter().map(|path| load_file(path, options))).await;

        let files: Vec<FileOutcome> = paths
            .into_iter()
            .zip(results)
            .map(|(path, result)| FileOutcome { path, result })
            .collect();

        for failure in files.iter().filter(|f| !f.is_ok()) {
            if let Err(e) = &failure.result {
                warn!(path = %failure.path.display(), error = %e, "Content file rejected");
            }
        }
        info!(
            collection = %self.collection,
            files = files.len(),
            failed = files.iter().filter(|f| !f.is_ok()).count(),
            "Loaded content"
        );

        Ok(LoadReport {
            collection: self.collection.clone(),
            files,
        })
    }

    /// Loads all files and returns the content set, failing on any bad file.
    pub async fn load_content(&self) -> Result<ContentSet, StoreError> {
        self.load().await?.into_content_set()
    }
}

/// Reads and validates one file.
pub async fn load_file(
    path: &Path,
    options: ValidationOptions,
) -> Result<ProviderCollection, StoreError> {
    let raw = read_document(path).await?;
    let collection = validate_with(&raw, &options).map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        providers = collection.len(),
        plans = collection.plan_count(),
        "Validated content file"
    );
    Ok(collection)
}

/// Returns `path` relative to the content `root`.
///
/// Leading `.` components are ignored on both sides, so a root of
/// `./content` matches the `content/...` paths glob yields. Paths outside
/// the root are returned unchanged.
pub fn relative_path<'p>(path: &'p Path, root: &Path) -> &'p Path {
    let root: PathBuf = root
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let trimmed = path.strip_prefix(".").unwrap_or(path);
    trimmed.strip_prefix(&root).unwrap_or(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"{"providers":[{"name":"Acme","url":"https://acme.example","protocols":["S3"],"plans":[{"name":"Basic","baseCost":{"value":5,"currency":"USD"},"storage":{"included":100}}]}]}"#;

    async fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[test]
    fn test_relative_path_ignores_current_dir() {
        assert_eq!(
            relative_path(Path::new("content/data/a.json"), Path::new("./content")),
            Path::new("data/a.json")
        );
        assert_eq!(
            relative_path(Path::new("./content/data/a.json"), Path::new("content")),
            Path::new("data/a.json")
        );
        assert_eq!(
            relative_path(Path::new("data/a.json"), Path::new(".")),
            Path::new("data/a.json")
        );
        assert_eq!(
            relative_path(Path::new("/srv/content/data/a.json"), Path::new("/srv/content")),
            Path::new("data/a.json")
        );
        assert_eq!(
            relative_path(Path::new("/elsewhere/a.json"), Path::new("/srv/content")),
            Path::new("/elsewhere/a.json")
        );
    }

    #[test]
    fn test_pattern_joins_root_and_source() {
        let loader = ContentLoader::new("/srv/content", "data/**/*.json");
        assert_eq!(loader.pattern(), "/srv/content/data/**/*.json");
    }

    #[tokio::test]
    async fn test_discover_sorted_and_nested() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "data/b.json", VALID).await;
        write(temp_dir.path(), "data/a.json", VALID).await;
        write(temp_dir.path(), "data/eu/c.json", VALID).await;
        write(temp_dir.path(), "data/notes.txt", "ignored").await;

        let loader = ContentLoader::new(temp_dir.path(), "data/**/*.json");
        let files = loader.discover().unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("data/a.json"),
                PathBuf::from("data/b.json"),
                PathBuf::from("data/eu/c.json"),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_valid_files() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "data/a.json", VALID).await;
        write(temp_dir.path(), "data/b.json", VALID).await;

        let loader = ContentLoader::new(temp_dir.path(), "data/**/*.json");
        let report = loader.load().await.unwrap();

        assert!(report.is_ok());
        assert_eq!(report.files.len(), 2);

        let content = report.into_content_set().unwrap();
        assert_eq!(content.documents.len(), 2);
        assert_eq!(content.provider_count(), 2);
    }

    #[tokio::test]
    async fn test_bad_file_fails_whole_set() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "data/a.json", VALID).await;
        write(
            temp_dir.path(),
            "data/b.json",
            &VALID.replace(r#""value":5"#, r#""value":"five""#),
        )
        .await;

        let loader = ContentLoader::new(temp_dir.path(), "data/**/*.json");
        let report = loader.load().await.unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.failure_count(), 1);
        let failure = report.failures().next().unwrap();
        assert!(failure.path.ends_with("b.json"));
        let err = failure.result.as_ref().unwrap_err();
        assert_eq!(
            err.validation().map(|v| v.path().to_string()),
            Some("providers[0].plans[0].baseCost.value".to_string())
        );

        let err = report.into_content_set().unwrap_err();
        assert!(matches!(err, StoreError::InvalidContent { failed: 1, total: 2 }));
    }

    #[tokio::test]
    async fn test_no_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(temp_dir.path(), "data/**/*.json");

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, StoreError::NoContent { .. }));
    }

    #[tokio::test]
    async fn test_options_apply_to_every_file() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "data/a.json",
            &VALID.replace(r#"["S3"]"#, r#"["S3","NFS"]"#),
        )
        .await;

        let strict = ContentLoader::new(temp_dir.path(), "data/*.json");
        assert!(strict.load_content().await.is_err());

        let open = strict.with_options(ValidationOptions::lenient());
        let content = open.load_content().await.unwrap();
        assert_eq!(content.provider_count(), 1);
    }
}
