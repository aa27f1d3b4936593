//! Track duration formatting.
//!
//! Durations are stored as display strings (`M:SS`). Catalog results carry
//! milliseconds; LLM output is free text that may be `3:45`, bare seconds
//! (`245`) or prose.

use std::sync::LazyLock;

use regex::Regex;

/// `M:SS` or `H:MM:SS`.
static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(:[0-5]\d){1,2}$").expect("valid regex"));

/// Format a whole number of seconds as `M:SS`.
pub fn format_seconds(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format a millisecond duration as `M:SS`, truncating partial seconds.
pub fn format_millis(duration_ms: u64) -> String {
    format_seconds(duration_ms / 1000)
}

/// Normalize an unverified duration string.
///
/// - Already clock-formatted (`3:45`) values are kept as-is.
/// - Bare seconds (`245`, `245.7`) become `M:SS`.
/// - Anything else yields `None`.
pub fn normalize_duration(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if CLOCK_RE.is_match(trimmed) {
        return Some(trimmed.to_string());
    }
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Some(format_seconds(secs));
    }
    match trimmed.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Some(format_seconds(secs as u64)),
        _ => None,
    }
}
