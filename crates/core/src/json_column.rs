//! Persisted JSON column values.
//!
//! [`JsonColumn`] is the byte-level representation of a relational-database JSON column. The
//! library treats it as opaque: bytes go in validated, and come out either raw or as the JSON
//! text a driver would send. An empty column renders as the JSON literal `null`, matching how
//! JSON column types marshal an unset value.

use crate::{CoreError, CoreResult, JsonMap};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const NULL_LITERAL: &[u8] = b"null";

/// Validated JSON bytes as stored in a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonColumn(Vec<u8>);

impl JsonColumn {
    /// Wraps `bytes` after checking they are one well-formed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Decoding`] if the bytes are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> CoreResult<Self> {
        serde_json::from_slice::<IgnoredAny>(bytes).map_err(CoreError::Decoding)?;
        Ok(Self(bytes.to_vec()))
    }

    /// Encodes a dynamic value into a column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the value cannot be serialised.
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        serde_json::to_vec(value)
            .map(Self)
            .map_err(CoreError::Encoding)
    }

    /// Bytes produced by a serializer in this crate are valid by construction.
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw stored bytes (possibly empty).
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the JSON text of this column; an empty column yields `null`.
    pub fn to_json_bytes(&self) -> &[u8] {
        if self.0.is_empty() {
            NULL_LITERAL
        } else {
            &self.0
        }
    }

    /// Consumes the column and returns the raw stored bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes the column as a JSON object.
    ///
    /// `null` (including an empty column) decodes to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Decoding`] for malformed JSON or when the column holds an array or
    /// a scalar.
    pub fn to_map(&self) -> CoreResult<JsonMap> {
        let value: Value =
            serde_json::from_slice(self.to_json_bytes()).map_err(CoreError::Decoding)?;
        object_or_empty(value)
    }
}

/// Decodes `value` as an object; `null` is empty and any other shape is a decoding error.
pub(crate) fn object_or_empty(value: Value) -> CoreResult<JsonMap> {
    match value {
        Value::Null => Ok(JsonMap::new()),
        other => serde_json::from_value(other).map_err(CoreError::Decoding),
    }
}

/// Short name of a dynamic value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for JsonColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.to_json_bytes()))
    }
}

impl FromStr for JsonColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

impl TryFrom<Vec<u8>> for JsonColumn {
    type Error = CoreError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        serde_json::from_slice::<IgnoredAny>(&bytes).map_err(CoreError::Decoding)?;
        Ok(Self(bytes))
    }
}

impl Serialize for JsonColumn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value: Value =
            serde_json::from_slice(self.to_json_bytes()).map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonColumn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        JsonColumn::from_value(&value).map_err(serde::de::Error::custom)
    }
}
