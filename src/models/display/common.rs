//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Placeholder for empty cells
pub const EMPTY_CELL: &str = "--";

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` (UTC)
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Render an optional value, falling back to the empty-cell placeholder
pub fn or_empty(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Format a daily rate as currency
pub fn format_rate(rate: f64) -> String {
    format!("${:.2}", rate)
}
