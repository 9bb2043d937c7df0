//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp in canonical ISO 8601 form, e.g. `2024-05-01T10:00:00.000Z`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC calendar date of a timestamp as `YYYY-MM-DD`
pub fn utc_date_key(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// True when the text is missing meaningful characters
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
