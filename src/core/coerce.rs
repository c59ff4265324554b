//! Never-failing field coercion and derived-value logic.
//!
//! CSV cells arrive as raw strings from a human-edited spreadsheet. Every
//! coercion here returns a usable domain value: blank, whitespace-only, or
//! unparseable input falls back to the caller's default so a build always
//! produces a well-formed binary file. Bad input is logged, never fatal.

use tracing::warn;

/// Parse a float cell. Blank input yields `default` silently; non-blank
/// garbage yields `default` with a warning.
pub fn parse_f64(raw: &str, default: f64) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            warn!("unparseable numeric field '{}', using default {}", trimmed, default);
            default
        }
    }
}

/// Parse an integer cell. Goes through float first so decimal-looking
/// integer columns ("12.0") still coerce, then truncates toward zero.
pub fn parse_i64(raw: &str, default: i64) -> i64 {
    parse_f64(raw, default as f64) as i64
}

/// Truthy flag cells: "yes", "true", or "1", case-insensitive.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1")
}

/// Parse a `"min-max"` range cell, yielding the integer average of both
/// ends. Plain numeric cells parse as-is; blank or garbage input yields
/// `default`.
pub fn range_average(raw: &str, default: i64) -> i64 {
    match split_range(raw) {
        Some((lo, hi)) => (lo + hi) / 2,
        None => parse_i64(raw, default),
    }
}

/// Like [`range_average`], but keeps the lower end of the range.
pub fn range_min(raw: &str, default: i64) -> i64 {
    match split_range(raw) {
        Some((lo, _)) => lo,
        None => parse_i64(raw, default),
    }
}

fn split_range(raw: &str) -> Option<(i64, i64)> {
    let trimmed = raw.trim();
    if !trimmed.contains('-') {
        return None;
    }
    let mut parts = trimmed.split('-');
    let lo = parse_i64(parts.next().unwrap_or(""), 0);
    let hi = parse_i64(parts.next().unwrap_or(""), 0);
    Some((lo, hi))
}

/// Planting density (plants per square metre) derived from row and in-row
/// spacing. Non-positive spacing yields 0.0 rather than a division blowup.
pub fn density_from_spacing(row_m: f64, plant_m: f64) -> f64 {
    if row_m <= 0.0 || plant_m <= 0.0 {
        return 0.0;
    }
    1.0 / (row_m * plant_m)
}
