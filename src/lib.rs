//! # recordkit
//!
//! Small, stateless helpers for services that persist records as JSON and hand out upload
//! URLs:
//! - [`records`]: record/map/JSON-column conversion, lenient document field reads, time-zone
//!   aware formatting, name normalisation and an absence predicate
//! - [`ulid`]: sortable unique identifiers and object-key uniqueness injection
//! - [`storage`]: presigned S3 upload URLs
//!
//! Logging goes through `tracing`; call [`telemetry::init`] once at startup if the host
//! application has not installed a subscriber of its own.

pub use recordkit_core as records;
pub use recordkit_storage as storage;
pub use recordkit_ulid as ulid;

pub use recordkit_core::{
    convert_to_alphabet_only, get_date_string_by_location, get_json_f64, get_json_i64,
    get_json_string, get_json_timestamp, get_timestamp_format, is_nil, json_to_map, map_to_json,
    map_to_struct, struct_to_map, struct_to_string, CoreError, JsonColumn,
};
pub use recordkit_storage::{get_presigned_url_v2, PresignedUrlRequest, PresignedUrlResponse};
pub use recordkit_ulid::get_ulid;

pub mod telemetry {
    //! Logging bootstrap for host applications.

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    /// Default filter directive when `RUST_LOG` does not mention recordkit.
    pub const DEFAULT_DIRECTIVE: &str = "recordkit=info";

    /// Loads `.env` (if present) and installs a `fmt` subscriber filtered by `RUST_LOG`.
    ///
    /// Returns `false` when a global subscriber was already installed; calling this more than
    /// once is harmless.
    pub fn init() -> bool {
        // A missing .env file is the normal case outside local development.
        dotenvy::dotenv().ok();

        let filter = match DEFAULT_DIRECTIVE.parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DocumentFields, ReadMode};
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Listing {
        title: String,
        bedrooms: i64,
        listed_at: String,
        attributes: JsonColumn,
    }

    fn listing() -> Listing {
        Listing {
            title: "Two-bed flat".to_string(),
            bedrooms: 2,
            listed_at: "2025-03-01T10:00:00Z".to_string(),
            attributes: r#"{"parking":true}"#.parse().unwrap(),
        }
    }

    #[test]
    fn test_record_survives_map_round_trip() {
        let original = listing();

        let map = struct_to_map(&original);
        let restored: Listing = map_to_struct(&map).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_persisted_column_feeds_lenient_accessors() {
        let column = map_to_json(&listing()).unwrap();

        assert_eq!(get_json_string(&column, "title", ""), "Two-bed flat");
        assert_eq!(get_json_i64(&column, "bedrooms", 0), 2);
        assert_eq!(
            get_json_timestamp(&column, "listed_at", Utc::now()),
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(get_json_string(&column, "attributes", "none"), "none");

        let fields = DocumentFields::parse(&column, ReadMode::Strict).unwrap();
        assert!(fields.value("attributes").unwrap().is_object());
    }

    #[test]
    fn test_timestamps_render_in_listing_zone() {
        let listed = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();

        assert_eq!(
            get_timestamp_format(listed, "%Y-%m-%d %H:%M", "Australia/Sydney"),
            "2025-03-01 21:00"
        );
    }

    #[test]
    fn test_telemetry_init_is_idempotent() {
        telemetry::init();
        assert!(!telemetry::init());
    }
}
