//! Path-aware accessors over `serde_json::Value`.
//!
//! Each accessor either returns the typed value or a [`ValidationError`]
//! located at the path it was given. Nothing is coerced.

use serde_json::{Map, Value};

use crate::error::{FormatError, JsonType, SchemaError, ValidationError};
use crate::path::FieldPath;

use super::UnknownFieldPolicy;

/// A JSON object being read at a known path.
pub(super) struct Object<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
}

impl<'a> Object<'a> {
    /// Reads `value` as an object.
    pub(super) fn new(value: &'a Value, path: FieldPath) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(wrong_type(path, JsonType::Object, other)),
        }
    }

    /// Returns a required member and its path.
    pub(super) fn required(&self, key: &str) -> Result<(&'a Value, FieldPath), ValidationError> {
        let path = self.path.key(key);
        match self.map.get(key) {
            Some(value) => Ok((value, path)),
            None => Err(ValidationError::schema(path, SchemaError::MissingField)),
        }
    }

    /// Returns an optional member and its path.
    ///
    /// An explicit `null` counts as present, so it fails the type check of
    /// the caller instead of being read as absent.
    pub(super) fn optional(&self, key: &str) -> Option<(&'a Value, FieldPath)> {
        self.map.get(key).map(|value| (value, self.path.key(key)))
    }

    /// Applies the unknown-field policy against the declared member names.
    pub(super) fn check_unknown(
        &self,
        declared: &[&str],
        policy: UnknownFieldPolicy,
    ) -> Result<(), ValidationError> {
        if policy == UnknownFieldPolicy::Ignore {
            return Ok(());
        }
        match self.map.keys().find(|k| !declared.contains(&k.as_str())) {
            Some(key) => Err(ValidationError::schema(
                self.path.key(key.as_str()),
                SchemaError::UnknownField,
            )),
            None => Ok(()),
        }
    }
}

pub(super) fn wrong_type(path: FieldPath, expected: JsonType, actual: &Value) -> ValidationError {
    ValidationError::schema(
        path,
        SchemaError::WrongType {
            expected,
            actual: JsonType::of(actual),
        },
    )
}

pub(super) fn expect_array<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> Result<&'a [Value], ValidationError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(wrong_type(path.clone(), JsonType::Array, other)),
    }
}

pub(super) fn expect_str<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> Result<&'a str, ValidationError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(wrong_type(path.clone(), JsonType::String, other)),
    }
}

pub(super) fn expect_bool(value: &Value, path: &FieldPath) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(wrong_type(path.clone(), JsonType::Boolean, other)),
    }
}

pub(super) fn expect_number(value: &Value, path: &FieldPath) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .ok_or_else(|| wrong_type(path.clone(), JsonType::Number, value))
}

/// Reads a number that must be zero or greater.
pub(super) fn expect_quantity(value: &Value, path: &FieldPath) -> Result<f64, ValidationError> {
    let n = expect_number(value, path)?;
    if n < 0.0 {
        return Err(ValidationError::format(path.clone(), FormatError::Negative(n)));
    }
    Ok(n)
}

/// Reads a string that must contain something other than whitespace.
pub(super) fn expect_text(value: &Value, path: &FieldPath) -> Result<String, ValidationError> {
    let s = expect_str(value, path)?;
    if s.trim().is_empty() {
        return Err(ValidationError::format(path.clone(), FormatError::EmptyText));
    }
    Ok(s.to_string())
}

/// Validates every element of an array, stopping at the first failure.
pub(super) fn each<T>(
    items: &[Value],
    path: &FieldPath,
    mut f: impl FnMut(&Value, FieldPath) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| f(item, path.index(i)))
        .collect()
}
