//! Lenient calendar-date parsing.
//!
//! Municipal exports disagree on date formats; we try a fixed, ordered list
//! and fall back to a leading `YYYY-MM-DD` prefix (which also covers ISO
//! datetimes with a `T` separator). Anything else is unparseable and the
//! caller rejects the record.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

static ISO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("static pattern"));

/// Parse a raw date cell. Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Timestamps longer than "YYYY-MM-DD HH:MM:SS" (fractional seconds,
    // timezone suffixes) are truncated before format matching.
    let head = raw.get(..19).unwrap_or(raw);

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(head, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(head, format) {
            return Some(datetime.date());
        }
    }

    let captures = ISO_PREFIX.captures(raw)?;
    let year = captures.get(1)?.as_str().parse().ok()?;
    let month = captures.get(2)?.as_str().parse().ok()?;
    let day = captures.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
