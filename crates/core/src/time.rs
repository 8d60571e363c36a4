//! Time-zone aware timestamp rendering.
//!
//! Zones are resolved by IANA name (`"America/New_York"`, `"Europe/London"`) against the
//! bundled tz database. Layouts use strftime-style specifiers (`"%Y-%m-%d %H:%M"`).
//!
//! The two formatters degrade differently when a zone does not resolve:
//! [`get_timestamp_format`] returns [`INVALID_DATE_SENTINEL`], while
//! [`get_date_string_by_location`] quietly renders in UTC. Callers rely on both behaviours.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Write;

/// Returned by [`get_timestamp_format`] when the zone or layout is unusable.
pub const INVALID_DATE_SENTINEL: &str = "0000-00-00";

/// Resolves a zone name; the empty string and `"UTC"` mean UTC.
pub fn resolve_location(location: &str) -> Option<Tz> {
    if location.is_empty() || location == "UTC" {
        return Some(Tz::UTC);
    }
    location.parse::<Tz>().ok()
}

/// Renders `instant` with `layout`, or `None` if the layout has an invalid specifier.
fn render<Z>(instant: &DateTime<Z>, layout: &str) -> Option<String>
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", instant.format(layout)).ok()?;
    Some(out)
}

/// Renders `timestamp` in `location` using `layout`.
///
/// Returns [`INVALID_DATE_SENTINEL`] if `location` does not resolve or `layout` is invalid.
pub fn get_timestamp_format(timestamp: DateTime<Utc>, layout: &str, location: &str) -> String {
    let Some(zone) = resolve_location(location) else {
        tracing::debug!(location, "unknown time zone; returning sentinel date");
        return INVALID_DATE_SENTINEL.to_string();
    };

    render(&timestamp.with_timezone(&zone), layout)
        .unwrap_or_else(|| INVALID_DATE_SENTINEL.to_string())
}

/// Renders `timestamp` (or now, when `None`) in `location` using `layout`.
///
/// An unknown `location` falls back to UTC. An invalid `layout` yields an empty string.
pub fn get_date_string_by_location(
    location: &str,
    layout: &str,
    timestamp: Option<DateTime<Utc>>,
) -> String {
    let timestamp = timestamp.unwrap_or_else(Utc::now);
    let zone = resolve_location(location).unwrap_or(Tz::UTC);

    render(&timestamp.with_timezone(&zone), layout).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> DateTime<Utc> {
        // 2024-07-04 03:30:00 UTC is still July 3rd in New York (UTC-4 in summer).
        Utc.with_ymd_and_hms(2024, 7, 4, 3, 30, 0).unwrap()
    }

    #[test]
    fn test_format_in_named_zone() {
        assert_eq!(
            get_timestamp_format(instant(), "%Y-%m-%d %H:%M", "America/New_York"),
            "2024-07-03 23:30"
        );
        assert_eq!(
            get_timestamp_format(instant(), "%Y-%m-%d %H:%M %Z", "Asia/Tokyo"),
            "2024-07-04 12:30 JST"
        );
    }

    #[test]
    fn test_format_invalid_location_returns_sentinel() {
        assert_eq!(
            get_timestamp_format(instant(), "%Y-%m-%d", "Mars/Olympus_Mons"),
            INVALID_DATE_SENTINEL
        );
    }

    #[test]
    fn test_format_invalid_layout_returns_sentinel() {
        assert_eq!(
            get_timestamp_format(instant(), "%Y-%Q", "Europe/London"),
            INVALID_DATE_SENTINEL
        );
    }

    #[test]
    fn test_utc_aliases() {
        assert_eq!(resolve_location(""), Some(Tz::UTC));
        assert_eq!(resolve_location("UTC"), Some(Tz::UTC));
        assert_eq!(get_timestamp_format(instant(), "%H:%M", ""), "03:30");
    }

    #[test]
    fn test_date_string_by_location() {
        assert_eq!(
            get_date_string_by_location("Europe/London", "%d/%m/%Y %H:%M", Some(instant())),
            "04/07/2024 04:30"
        );
    }

    #[test]
    fn test_date_string_unknown_location_uses_utc() {
        assert_eq!(
            get_date_string_by_location("Not/AZone", "%Y-%m-%d %H:%M", Some(instant())),
            "2024-07-04 03:30"
        );
    }

    #[test]
    fn test_date_string_defaults_to_now() {
        let before = Utc::now().format("%Y").to_string();
        let rendered = get_date_string_by_location("UTC", "%Y", None);
        let after = Utc::now().format("%Y").to_string();

        assert!(rendered == before || rendered == after);
    }

    #[test]
    fn test_date_string_invalid_layout_is_empty() {
        assert_eq!(get_date_string_by_location("UTC", "%Q", Some(instant())), "");
    }
}
