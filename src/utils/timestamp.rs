use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::utils::constants::{DATETIME_OUTPUT_FORMAT, TIMESTAMP_FORMATS};

/// Parses the timestamp layouts seen in weather exports: `YYYY-MM-DD HH:MM`,
/// with optional seconds and fraction, a `T` separator, RFC 3339 with an
/// offset (converted to UTC), or a bare date at midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DATETIME_OUTPUT_FORMAT).to_string()
}
