//! Reusable formatting utilities for CLI output
//!
//! Display models share these so every table renders absent values,
//! points and durations the same way.

use chrono::{DateTime, Utc};

/// Placeholder for absent values
pub const NONE: &str = "-";

/// Render an optional string, "-" when absent or empty.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NONE.to_string(),
    }
}

/// Render a finishing or grid position; 0 means unclassified.
pub fn format_position(position: u32) -> String {
    if position == 0 {
        NONE.to_string()
    } else {
        format!("P{}", position)
    }
}

/// Points without a trailing ".0" for whole values.
///
/// # Example output
/// - `25` for 25.0
/// - `4.5` for a half-points race
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

/// Signed points difference, e.g. `+12` or `-3.5`.
pub fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", format_points(delta))
    } else {
        format!("-{}", format_points(-delta))
    }
}

/// Format a fetch duration in milliseconds.
///
/// # Example output
/// - `850ms`
/// - `2.3s`
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}

/// Race day plus start time in UTC, e.g. `2024-06-09 18:00 UTC`.
pub fn format_start(start: Option<DateTime<Utc>>) -> String {
    match start {
        Some(t) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => NONE.to_string(),
    }
}
