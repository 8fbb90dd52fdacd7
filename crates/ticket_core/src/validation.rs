//! Field validation rules shared by the record, the persistence adapter and
//! front ends.
//!
//! # Responsibility
//! - Own the canonical pattern for every ticket field.
//! - Decide whether a date string names an existing calendar day.
//!
//! # Invariants
//! - Every pattern is matched against the whole string.
//! - Checks are pure and never panic; "does not match" is `false`, not an error.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Date layout agreed between storage and front ends (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(Pattern::Number.source()).expect("valid number regex"));
static SERIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(Pattern::Series.source()).expect("valid series regex"));
static FRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(Pattern::Fraction.source()).expect("valid fraction regex"));
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(Pattern::Price.source()).expect("valid price regex"));
// chrono accepts single-digit day/month for `%d`/`%m`; pin the shape first.
static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid date shape regex"));

/// Regex-backed field patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `00000`..`99999`, exactly five digits.
    Number,
    /// `0`..`160`, no leading zeros.
    Series,
    /// Single digit `0`..`9`.
    Fraction,
    /// `0`..`99`, no leading zeros.
    Price,
}

impl Pattern {
    /// Anchored regex source for this pattern.
    pub fn source(self) -> &'static str {
        match self {
            Self::Number => r"^[0-9]{5}$",
            Self::Series => r"^(?:0|[1-9][0-9]?|1[0-5][0-9]|160)$",
            Self::Fraction => r"^[0-9]$",
            Self::Price => r"^(?:0|[1-9][0-9]?)$",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Number => &*NUMBER_RE,
            Self::Series => &*SERIES_RE,
            Self::Fraction => &*FRACTION_RE,
            Self::Price => &*PRICE_RE,
        }
    }
}

/// Returns whether `value` matches `pattern` in full.
pub fn matches(value: &str, pattern: Pattern) -> bool {
    pattern.regex().is_match(value)
}

/// Returns whether `value` is a `DD/MM/YYYY` string naming a real day.
///
/// Leap years are honoured; day `00`, month `00` and out-of-range days
/// (e.g. `31/04/2024`) are rejected.
pub fn is_valid_date(value: &str) -> bool {
    DATE_SHAPE_RE.is_match(value) && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Today's local date in [`DATE_FORMAT`].
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
