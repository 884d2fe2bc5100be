//! Common helper functions for output formatting.

use chrono::Local;
use dirq_directory::AttrValue;

/// Truncates a string to a maximum length.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    } else {
        s.to_string()
    }
}

/// Formats an attribute value for a table cell, truncated to `max_len`.
pub fn format_value(value: &AttrValue, max_len: usize) -> String {
    truncate_str(&value.to_string(), max_len)
}

/// Formats a datetime string for display.
pub fn format_datetime(datetime: &str) -> String {
    // Try to parse ISO 8601 / RFC 3339 format
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(datetime) {
        let local = dt.with_timezone(&Local);
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        // Fallback to original string
        datetime.to_string()
    }
}

/// Renders a detail-view value: RFC 3339 text values are shown as local
/// datetimes, everything else through its display form.
pub fn format_detail_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(s) => format_datetime(s),
        other => other.to_string(),
    }
}

/// Pluralizes a record count for summary lines.
pub fn format_record_count(count: usize) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{} records", count)
    }
}
