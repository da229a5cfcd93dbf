// ABOUTME: Date parsing for feed timestamps.
// ABOUTME: Attribute dates try RFC 3339 then RFC 1123 with a numeric zone.

use chrono::{DateTime, FixedOffset};

/// RFC 1123 with a numeric zone, e.g. "Thu, 02 Mar 2017 17:15:27 +0000".
const RFC1123Z_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Parses an RFC 1123 numeric-zone timestamp, preserving its offset.
/// Returns None if the value does not match.
pub fn parse_rfc1123z(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s.trim(), RFC1123Z_FORMAT).ok()
}

/// Parses a date attribute value using the accepted formats in order:
/// RFC 3339 first, then RFC 1123 with a numeric zone.
/// Returns None if no format matches.
pub fn parse_feed_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    parse_rfc1123z(s)
}
