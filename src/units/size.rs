//! Size Parser Module
//!
//! Normalizes cache-capacity specifications into byte counts.

use super::split_magnitude;

// == Sentinel ==
/// Capacity is unbounded.
pub const UNLIMITED: i64 = -1;

// == Unit Constants ==
// Binary multiples, https://en.wikipedia.org/wiki/Byte#Multiple-byte_units
const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;
const PIB: f64 = TIB * 1024.0;

// Decimal multiples
const KB: f64 = 1000.0;
const MB: f64 = KB * 1000.0;
const GB: f64 = MB * 1000.0;
const TB: f64 = GB * 1000.0;
const PB: f64 = TB * 1000.0;

// == Size Spec ==
/// A capacity as callers express it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    /// No capacity bound
    Unlimited,
    /// Byte count, already numeric
    Bytes(u64),
    /// Human-readable form, e.g. "50mb", "1gi", "512"
    Text(String),
}

impl From<u64> for SizeSpec {
    fn from(bytes: u64) -> Self {
        SizeSpec::Bytes(bytes)
    }
}

impl From<&str> for SizeSpec {
    fn from(text: &str) -> Self {
        SizeSpec::Text(text.to_string())
    }
}

// == Parse Size ==
/// Normalizes a size spec into bytes, or `UNLIMITED`.
///
/// Units are matched by prefix, case-insensitive: `b` is bytes, `ki`/`mi`/
/// `gi`/`ti`/`pi` are binary multiples and `k`/`m`/`g`/`t`/`p` decimal
/// ones. A textual magnitude with no recognized unit reads as megabytes
/// when under 1024 and as bytes otherwise — the same ambiguous-magnitude
/// treatment the interval parser applies. Text with no leading number
/// parses as `UNLIMITED`.
pub fn parse_size(spec: Option<&SizeSpec>) -> i64 {
    let Some(spec) = spec else {
        return UNLIMITED;
    };

    match spec {
        SizeSpec::Unlimited => UNLIMITED,
        SizeSpec::Bytes(bytes) => *bytes as i64,
        SizeSpec::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> i64 {
    let text = text.trim();
    if text.eq_ignore_ascii_case("unlimited") {
        return UNLIMITED;
    }

    let Some((value, rest)) = split_magnitude(text) else {
        return UNLIMITED;
    };
    let unit = rest.trim().to_ascii_lowercase();

    let bytes = if unit.starts_with('b') {
        value
    } else if unit.starts_with("ki") {
        value * KIB
    } else if unit.starts_with("mi") {
        value * MIB
    } else if unit.starts_with("gi") {
        value * GIB
    } else if unit.starts_with("ti") {
        value * TIB
    } else if unit.starts_with("pi") {
        value * PIB
    } else if unit.starts_with('k') {
        value * KB
    } else if unit.starts_with('m') {
        value * MB
    } else if unit.starts_with('g') {
        value * GB
    } else if unit.starts_with('t') {
        value * TB
    } else if unit.starts_with('p') {
        value * PB
    } else if value < 1024.0 {
        // Bare small magnitudes read as megabytes
        value * MB
    } else {
        value
    };

    bytes as i64
}
