//! Field accessors over JSON documents.
//!
//! The `get_json_*` functions are best-effort reads: a document that does not decode, a
//! missing key and a value of the wrong type all resolve to the caller's default. That
//! favours availability over error reporting and is the [`ReadMode::Lenient`] contract.
//!
//! [`DocumentFields`] exposes the same reads with failures reported, for callers that need to
//! know *why* a field was unusable.

use crate::json_column::{object_or_empty, value_kind, JsonColumn};
use crate::{CoreError, CoreResult, JsonMap};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde_json::Value;

/// Fixed layout of timestamp fields: `YYYY-MM-DDThh:mm:ssZ`, always UTC.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// How [`DocumentFields::parse`] treats a document that does not decode to an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Undecodable documents behave as empty ones.
    #[default]
    Lenient,
    /// Undecodable documents are reported.
    Strict,
}

/// Decoded top-level fields of a JSON document.
#[derive(Clone, Debug, Default)]
pub struct DocumentFields {
    fields: JsonMap,
}

impl DocumentFields {
    /// Decodes `document` into its top-level fields.
    ///
    /// `null` and empty columns decode to no fields in both modes.
    ///
    /// # Errors
    ///
    /// In [`ReadMode::Strict`], returns [`CoreError::Decoding`] for malformed JSON, arrays and
    /// scalars. [`ReadMode::Lenient`] never fails.
    pub fn parse(document: &JsonColumn, mode: ReadMode) -> CoreResult<Self> {
        let decoded = serde_json::from_slice::<Value>(document.to_json_bytes())
            .map_err(CoreError::Decoding)
            .and_then(object_or_empty);

        match (decoded, mode) {
            (Ok(fields), _) => Ok(Self { fields }),
            (Err(e), ReadMode::Lenient) => {
                tracing::debug!(error = %e, "document did not decode; reading as empty");
                Ok(Self::default())
            }
            (Err(e), ReadMode::Strict) => Err(e),
        }
    }

    /// Returns the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] if the key is absent.
    pub fn value(&self, key: &str) -> CoreResult<&Value> {
        self.fields
            .get(key)
            .ok_or_else(|| CoreError::MissingField(key.to_string()))
    }

    /// Reads a string field.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingField`] or [`CoreError::FieldType`].
    pub fn string(&self, key: &str) -> CoreResult<&str> {
        let value = self.value(key)?;
        value
            .as_str()
            .ok_or_else(|| type_mismatch(key, "a string", value))
    }

    /// Reads a timestamp stored as a string in [`TIMESTAMP_LAYOUT`].
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingField`], or [`CoreError::FieldType`] when the value is not a string
    /// or does not match the layout.
    pub fn timestamp(&self, key: &str) -> CoreResult<DateTime<Utc>> {
        let raw = self.string(key)?;
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_LAYOUT)
            .ok()
            // chrono accepts second 60 as a leap second; the layout only allows 00-59.
            .filter(|naive| naive.nanosecond() < 1_000_000_000)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| CoreError::FieldType {
                key: key.to_string(),
                expected: "a YYYY-MM-DDThh:mm:ssZ timestamp",
                found: "string",
            })
    }

    /// Reads any numeric field as `f64`.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingField`] or [`CoreError::FieldType`].
    pub fn f64(&self, key: &str) -> CoreResult<f64> {
        let value = self.value(key)?;
        value
            .as_f64()
            .ok_or_else(|| type_mismatch(key, "a number", value))
    }

    /// Reads an integral numeric field that fits in `i64`.
    ///
    /// Fractional numbers such as `3.5` are a type mismatch.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingField`] or [`CoreError::FieldType`].
    pub fn i64(&self, key: &str) -> CoreResult<i64> {
        let value = self.value(key)?;
        value
            .as_i64()
            .ok_or_else(|| type_mismatch(key, "an integer", value))
    }
}

fn type_mismatch(key: &str, expected: &'static str, found: &Value) -> CoreError {
    CoreError::FieldType {
        key: key.to_string(),
        expected,
        found: value_kind(found),
    }
}

fn read_or_default<T>(
    document: &JsonColumn,
    key: &str,
    default: T,
    read: impl FnOnce(&DocumentFields) -> CoreResult<T>,
) -> T {
    match DocumentFields::parse(document, ReadMode::Lenient).and_then(|fields| read(&fields)) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(key, error = %e, "using default for document field");
            default
        }
    }
}

/// Reads a string field, or returns `default`.
pub fn get_json_string(document: &JsonColumn, key: &str, default: &str) -> String {
    read_or_default(document, key, default.to_string(), |fields| {
        fields.string(key).map(str::to_string)
    })
}

/// Reads a `YYYY-MM-DDThh:mm:ssZ` timestamp field, or returns `default`.
pub fn get_json_timestamp(
    document: &JsonColumn,
    key: &str,
    default: DateTime<Utc>,
) -> DateTime<Utc> {
    read_or_default(document, key, default, |fields| fields.timestamp(key))
}

/// Reads a numeric field as `f64`, or returns `default`.
pub fn get_json_f64(document: &JsonColumn, key: &str, default: f64) -> f64 {
    read_or_default(document, key, default, |fields| fields.f64(key))
}

/// Reads an integral field as `i64`, or returns `default`.
pub fn get_json_i64(document: &JsonColumn, key: &str, default: i64) -> i64 {
    read_or_default(document, key, default, |fields| fields.i64(key))
}
