//! Interval Parser Module
//!
//! Normalizes update-interval specifications into milliseconds.

use super::split_magnitude;

// == Sentinel ==
/// Entries never expire.
pub const NEVER: i64 = -1;

// == Unit Constants ==
const SECOND: f64 = 1000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;

// == Interval Spec ==
/// An update interval as callers express it.
///
/// The numeric and textual forms parse differently on purpose: an already
/// numeric value is unambiguously milliseconds, while an unsuffixed textual
/// magnitude under 1000 reads as seconds (see `parse_interval`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalSpec {
    /// Entries never expire
    Never,
    /// Milliseconds, already numeric
    Millis(u64),
    /// Human-readable form, e.g. "5 seconds", "2m", "250ms"
    Text(String),
}

impl From<u64> for IntervalSpec {
    fn from(ms: u64) -> Self {
        IntervalSpec::Millis(ms)
    }
}

impl From<&str> for IntervalSpec {
    fn from(text: &str) -> Self {
        IntervalSpec::Text(text.to_string())
    }
}

// == Parse Interval ==
/// Normalizes an interval spec into milliseconds, or `NEVER`.
///
/// Textual units are matched by prefix, case-insensitive: `ms`, `s`, `m`
/// (minutes), `h`, `d`. A textual magnitude with no recognized unit reads
/// as seconds when under 1000 and as milliseconds otherwise; malformed
/// unit strings deliberately fall through to that same rule instead of
/// failing. Text with no leading number at all parses as `NEVER`.
pub fn parse_interval(spec: Option<&IntervalSpec>) -> i64 {
    let Some(spec) = spec else {
        return NEVER;
    };

    match spec {
        IntervalSpec::Never => NEVER,
        IntervalSpec::Millis(ms) => *ms as i64,
        IntervalSpec::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> i64 {
    let text = text.trim();
    if text.eq_ignore_ascii_case("never") {
        return NEVER;
    }

    let Some((value, rest)) = split_magnitude(text) else {
        return NEVER;
    };
    let unit = rest.trim().to_ascii_lowercase();

    let millis = if unit.starts_with("ms") {
        value
    } else if unit.starts_with('s') {
        value * SECOND
    } else if unit.starts_with('m') {
        value * MINUTE
    } else if unit.starts_with('h') {
        value * HOUR
    } else if unit.starts_with('d') {
        value * DAY
    } else if value < 1000.0 {
        // Bare small magnitudes read as seconds, not surprising sub-second
        // TTLs
        value * SECOND
    } else {
        value
    };

    millis as i64
}
