//! Structural converters.
//!
//! Records move between static and dynamic shapes through a `serde_json::Value` round-trip:
//! serialise the source, then deserialise into the target shape. Derived `Serialize` and
//! `Deserialize` impls describe each shape, so no runtime reflection is involved.

use crate::json_column::{object_or_empty, JsonColumn};
use crate::{CoreError, CoreResult, JsonMap};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Key of the single-entry payload returned by [`struct_to_map`] on failure.
pub const ERROR_KEY: &str = "error";

/// Re-shapes `source` into `T` through the generic JSON form.
///
/// Typical uses are filling a record from a dynamic map and copying between two records that
/// share field names.
///
/// # Errors
///
/// - [`CoreError::Encoding`] if `source` cannot be serialised.
/// - [`CoreError::Decoding`] if the serialised value does not fit `T`.
pub fn map_to_struct<S, T>(source: &S) -> CoreResult<T>
where
    S: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let value = serde_json::to_value(source).map_err(CoreError::Encoding)?;
    serde_json::from_value(value).map_err(CoreError::Decoding)
}

/// Converts `source` into a dynamic map, reporting failures.
///
/// A source that serialises to `null` yields an empty map.
///
/// # Errors
///
/// - [`CoreError::Encoding`] if `source` cannot be serialised.
/// - [`CoreError::Decoding`] if it serialises to an array or a scalar.
pub fn try_struct_to_map<S>(source: &S) -> CoreResult<JsonMap>
where
    S: Serialize + ?Sized,
{
    let value = serde_json::to_value(source).map_err(CoreError::Encoding)?;
    object_or_empty(value)
}

/// Converts `source` into a dynamic map, never failing.
///
/// On failure this returns `{"error": <message>}` instead of an error. Callers cannot tell
/// that payload apart from a record whose only field is named `error`; use
/// [`try_struct_to_map`] when the distinction matters.
pub fn struct_to_map<S>(source: &S) -> JsonMap
where
    S: Serialize + ?Sized,
{
    try_struct_to_map(source).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "struct_to_map failed; returning error payload");
        let mut payload = JsonMap::new();
        payload.insert(ERROR_KEY.to_string(), Value::String(e.to_string()));
        payload
    })
}

/// Serialises `source` to JSON text, or returns an empty string on failure.
pub fn struct_to_string<S>(source: &S) -> String
where
    S: Serialize + ?Sized,
{
    serde_json::to_string(source).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "struct_to_string failed; returning empty string");
        String::new()
    })
}

/// Encodes `source` into a [`JsonColumn`] for persistence.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if `source` cannot be serialised.
pub fn map_to_json<S>(source: &S) -> CoreResult<JsonColumn>
where
    S: Serialize + ?Sized,
{
    serde_json::to_vec(source)
        .map(JsonColumn::from_encoded)
        .map_err(CoreError::Encoding)
}

/// Decodes a persisted [`JsonColumn`] into a dynamic map.
///
/// # Errors
///
/// Returns [`CoreError::Decoding`] if the column is not valid JSON or does not hold an
/// object.
pub fn json_to_map(document: &JsonColumn) -> CoreResult<JsonMap> {
    document.to_map()
}
