//! # recordkit core
//!
//! Stateless helpers for moving records between static and dynamic shapes:
//! - Structural converters between `Serialize`/`Deserialize` records, dynamic JSON maps and
//!   persisted [`JsonColumn`] values ([`convert`])
//! - Best-effort field accessors over JSON documents, with a strict sibling ([`document`])
//! - Time-zone aware timestamp rendering ([`time`])
//! - Name normalisation ([`text`]) and an absence predicate ([`nil`])
//!
//! Two error policies coexist and are kept distinct on purpose:
//! - **Propagating**: [`map_to_struct`], [`try_struct_to_map`], [`map_to_json`],
//!   [`json_to_map`] and the strict [`DocumentFields`] reads return [`CoreResult`].
//! - **Swallowing**: [`struct_to_map`], [`struct_to_string`], the `get_json_*` accessors and the
//!   time formatters never fail; they return a payload, a default or a sentinel instead.

pub mod convert;
pub mod document;
mod error;
pub mod json_column;
pub mod nil;
pub mod text;
pub mod time;

pub use convert::{
    json_to_map, map_to_json, map_to_struct, struct_to_map, struct_to_string, try_struct_to_map,
};
pub use document::{
    get_json_f64, get_json_i64, get_json_string, get_json_timestamp, DocumentFields, ReadMode,
    TIMESTAMP_LAYOUT,
};
pub use error::{CoreError, CoreResult};
pub use json_column::JsonColumn;
pub use nil::{is_nil, Nullable};
pub use text::convert_to_alphabet_only;
pub use time::{
    get_date_string_by_location, get_timestamp_format, resolve_location, INVALID_DATE_SENTINEL,
};

/// Dynamic key/value mapping used by the converters and accessors.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
