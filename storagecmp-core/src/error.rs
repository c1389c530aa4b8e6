//! Validation error types for provider plan documents.
//!
//! Every failure carries the [`FieldPath`] of the offending value and falls
//! into one of two families:
//!
//! - [`SchemaError`] - structural mismatch (missing, unknown or mistyped field)
//! - [`FormatError`] - value is present and correctly typed but violates a
//!   semantic constraint (malformed URL, negative amount, ...)

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::path::FieldPath;

// ============================================================================
// Validation Error
// ============================================================================

/// Error returned when a document does not conform to the provider plan schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Structural mismatch between input and expected shape.
    #[error("schema error at {path}: {kind}")]
    Schema {
        /// Path of the offending field.
        path: FieldPath,
        /// What went wrong.
        kind: SchemaError,
    },

    /// Correctly typed value that fails a semantic constraint.
    #[error("format error at {path}: {kind}")]
    Format {
        /// Path of the offending field.
        path: FieldPath,
        /// What went wrong.
        kind: FormatError,
    },
}

impl ValidationError {
    /// Creates a schema error at the given path.
    pub fn schema(path: FieldPath, kind: SchemaError) -> Self {
        Self::Schema { path, kind }
    }

    /// Creates a format error at the given path.
    pub fn format(path: FieldPath, kind: FormatError) -> Self {
        Self::Format { path, kind }
    }

    /// Returns the path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Schema { path, .. } | Self::Format { path, .. } => path,
        }
    }

    /// Returns true for structural (schema) errors.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Returns true for semantic (format) errors.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// Structural mismatch kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("missing required field")]
    MissingField,

    /// A field not declared by the schema is present.
    #[error("unknown field")]
    UnknownField,

    /// A field has the wrong JSON type.
    #[error("expected {expected}, found {actual}")]
    WrongType {
        /// Type the schema requires.
        expected: JsonType,
        /// Type actually found.
        actual: JsonType,
    },

    /// `baseCost` is neither a cost object nor an array of cost objects.
    #[error("expected a cost object or an array of cost objects, found {actual}")]
    InvalidBaseCost {
        /// Type actually found.
        actual: JsonType,
    },
}

// ============================================================================
// Format Errors
// ============================================================================

/// Semantic constraint violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Not a syntactically valid absolute URL.
    #[error("invalid absolute URL {value:?}: {reason}")]
    InvalidUrl {
        /// The rejected text.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Text that must not be empty is empty (or only whitespace).
    #[error("must not be empty")]
    EmptyText,

    /// A quantity or amount is below zero.
    #[error("must not be negative, found {0}")]
    Negative(f64),

    /// `baseCost` was given as an empty array.
    #[error("must contain at least one cost")]
    EmptyBaseCost,

    /// Protocol token outside the known set.
    #[error("unknown protocol {0:?}")]
    UnknownProtocol(String),
}

// ============================================================================
// JSON Type
// ============================================================================

/// The JSON type of a value, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl JsonType {
    /// Returns the type of the given value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name of this type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
