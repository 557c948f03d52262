//! Timestamp decoding for webhook payloads
//!
//! GitLab is not consistent about timestamp formats across event kinds and
//! versions. Formats are tried in a fixed order, first match wins, and every
//! result is normalized to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};

/// Formats carrying an explicit offset, e.g. `2025-12-14T16:07:21+01:00`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%.3f%:z"];

/// Formats that are UTC by construction, e.g. `2025-12-14 15:10:01 UTC`.
const UTC_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S UTC",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.3fZ",
];

/// Parse a webhook timestamp, normalized to UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in UTC_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    // Generic ISO-8601 fallback for anything the fixed formats missed
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Deserializer for optional timestamp fields.
///
/// Absent and `null` fields become `None`; a present string that matches no
/// known format is a deserialization error.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp format: {raw}"))),
    }
}
