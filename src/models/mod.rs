//! Wire records exchanged with the Birthy backend.
//!
//! Every field the backend may omit or send as `null` is optional here and
//! defaulted exactly once, when the record is converted into its domain type.

use chrono::{DateTime, NaiveDate, Utc};

pub mod auth;
pub mod birthday;
pub mod communication;
pub mod config;
pub mod person;

/// Parses an ISO-8601 date or timestamp into a calendar date.
///
/// Timestamps keep their UTC calendar day, matching how the backend stores
/// birth dates at midnight UTC.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parses an ISO-8601 timestamp; bare dates are read as midnight UTC.
pub fn parse_wire_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    parse_wire_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serializes a calendar date the way the backend expects it.
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
