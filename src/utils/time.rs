//! Timestamp parsing and rendering for the CLI.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(AppError::InvalidTimestamp(s.to_string()))
}

/// `--at` value, or now.
pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<DateTime<Utc>> {
    match input {
        Some(s) => parse_timestamp(s),
        None => Ok(Utc::now()),
    }
}

/// `YYYY-MM-DD HH:MM` in the local time zone of the machine.
pub fn format_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
