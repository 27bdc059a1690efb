//! Natural-language due-date parsing.

use std::sync::LazyLock;

use chrono::{Duration, Local, NaiveDate};
use regex::Regex;

/// Ordinal day suffixes ("1st", "22nd") that block chrono's numeric
/// day parsing.
static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Compile-time literal pattern.
    Regex::new(r"(\d{1,2})(?:st|nd|rd|th)\b").expect("valid ordinal pattern")
});

/// Exact formats tried in order once ordinal suffixes are stripped.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
];

/// Comma-less month-day forms. Tried only after the month-year fallback:
/// chrono would otherwise consume "August 2014" here as day 20 of year 14.
const LOOSE_DATE_FORMATS: &[&str] = &["%b %d %Y", "%B %d %Y"];

/// Normalize a due-date value to `YYYY-MM-DD 00:00:00`.
///
/// Accepts ISO dates, month-name forms ("Sep 1st, 2014"), month-year forms
/// ("August 2014", resolved to the first of the month), and the relative
/// keywords "today" and "tomorrow". When nothing parses, the trimmed raw
/// value is returned verbatim so user intent is never silently dropped.
#[must_use]
pub fn normalize_due(raw: &str) -> String {
    let raw = raw.trim();
    match parse_natural_date(raw) {
        Some(date) => format!("{} 00:00:00", date.format("%Y-%m-%d")),
        None => raw.to_owned(),
    }
}

/// Attempt to interpret free text as a calendar date.
#[must_use]
pub fn parse_natural_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    match value.to_lowercase().as_str() {
        "today" => return Some(Local::now().date_naive()),
        "tomorrow" => return Some(Local::now().date_naive() + Duration::days(1)),
        _ => {}
    }

    let stripped = ORDINAL_SUFFIX.replace_all(value, "$1");

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&stripped, format) {
            return Some(date);
        }
    }

    // Month-year forms carry no day; parse with a synthetic first-of-month.
    let padded = format!("{stripped} 1");
    for format in ["%B %Y %d", "%b %Y %d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&padded, format) {
            return Some(date);
        }
    }

    for format in LOOSE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&stripped, format) {
            return Some(date);
        }
    }

    None
}
