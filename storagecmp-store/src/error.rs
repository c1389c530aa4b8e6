//! Store error types.

use std::path::PathBuf;

use storagecmp_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while configuring or loading content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A content file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A content file is not well-formed JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Syntax {
        /// File that failed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A content file does not conform to the provider plan schema.
    #[error("Invalid content in {}: {source}", path.display())]
    Invalid {
        /// File that failed.
        path: PathBuf,
        /// First validation failure.
        #[source]
        source: ValidationError,
    },

    /// One or more files of a load failed.
    #[error("{failed} of {total} content files are invalid")]
    InvalidContent {
        /// Number of failed files.
        failed: usize,
        /// Number of files found.
        total: usize,
    },

    /// The source pattern matched no files.
    #[error("No content files match {pattern}")]
    NoContent {
        /// Full glob pattern that was searched.
        pattern: String,
    },

    /// The source pattern is not a valid glob.
    #[error("Invalid content pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A matched path could not be inspected.
    #[error("Content discovery failed: {0}")]
    Glob(#[from] glob::GlobError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the error is about the content data itself rather
    /// than the environment (files, patterns, configuration).
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            StoreError::Syntax { .. }
                | StoreError::Invalid { .. }
                | StoreError::InvalidContent { .. }
        )
    }

    /// Returns the validation error, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}
