//! Upload timestamp parsing and recency ordering
//!
//! The backend serializes `uploadedAt` from a zone-less local date-time, so
//! values usually arrive without an offset (`2025-01-15T10:30:00.123`).
//! Offsets (`Z`, `+02:00`) are accepted too. Zone-less values are read as UTC.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::protocol::FileMetadata;

/// Formats tried for timestamps without an offset
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an `uploadedAt` value
///
/// Returns `None` if the value matches none of the accepted formats.
pub fn parse_uploaded_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort files newest first and keep at most `limit` of them
///
/// The server's ordering is ignored. Files whose timestamp cannot be parsed
/// sort after every parseable one; ties keep their server order.
pub fn sort_most_recent(mut files: Vec<FileMetadata>, limit: usize) -> Vec<FileMetadata> {
    files.sort_by_cached_key(|f| Reverse(parse_uploaded_at(&f.uploaded_at)));
    files.truncate(limit);
    files
}
