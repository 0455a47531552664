/*
 * dates.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Date formatting for table values.
//!
//! Backend snapshots carry dates in a handful of shapes (`2024-01-01`,
//! `2024-01-01T09:00:00Z`, `01/01/2024`). Date-tagged fields are normalized
//! to the short `M/D/YYYY` display form; an unparseable string silently
//! becomes the field's fallback, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a date string in any of the accepted shapes.
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date);
    }
    None
}

/// Format a date in the short display form, without zero padding.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Reformat a raw date string for display, or `None` if it cannot be parsed.
pub fn reformat(raw: &str) -> Option<String> {
    parse_flexible(raw).map(format_short)
}
