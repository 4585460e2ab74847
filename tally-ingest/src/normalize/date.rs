//! Date and time-of-day normalization.
//!
//! Accepted date encodings (all for 2025-01-15):
//!   2025-01-15   2025/01/15   20250115
//!   15/01/2025   01/15/2025   15/01/25   15-01-25   15.01.2025
//!   15-Jan-2025  15 Jan 2025  Jan 15, 2025

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DateOrder;

static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("valid regex"));

static COMPACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"));

static DMY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})$").expect("valid regex")
});

/// A date followed by a clock time: "2025-11-24 | 08:00:00",
/// "2025-11-24T08:00:00Z", "15/01/2025 8:30 PM".
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<date>.+?)(?:\s*\|\s*|T|\s+)",
        r"(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\.\d+)?(?:\s*[AaPp][Mm])?)",
        r"(?:Z|[+-]\d{2}:?\d{2})?$"
    ))
    .expect("valid regex")
});

const NAMED_MONTH_FORMATS: [&str; 6] = [
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d-%b-%y",
];

const TIME_FORMATS: [&str; 6] = [
    "%H:%M:%S",
    "%H:%M",
    "%H:%M:%S%.f",
    "%I:%M %p",
    "%I:%M:%S %p",
    "%I:%M%p",
];

/// Split a combined date/time cell into its date part and optional time part.
///
/// A `|` separator always splits, even when the trailing part is not a clock
/// time; the caller decides what to do with an unparsable time.
pub fn split_date_time(raw: &str) -> (&str, Option<&str>) {
    let s = raw.trim().trim_matches('"').trim();
    if let Some((date, time)) = s.split_once('|') {
        let time = time.trim();
        return (date.trim(), (!time.is_empty()).then_some(time));
    }
    match DATE_TIME_RE.captures(s) {
        Some(caps) => {
            let date = caps.name("date").map_or(s, |m| m.as_str().trim());
            (date, caps.name("time").map(|m| m.as_str()))
        }
        None => (s, None),
    }
}

fn capture_u32(caps: &regex::Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

/// Parse a date cell into a calendar date.
///
/// Numeric day/month dates are read day-first when the first component is
/// over 12 and month-first when the second is; otherwise `order` decides.
pub fn parse_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let s = raw.trim().trim_matches('"').trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_RE.captures(s).or_else(|| COMPACT_RE.captures(s)) {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, capture_u32(&caps, 2)?, capture_u32(&caps, 3)?);
    }

    if let Some(caps) = DMY_RE.captures(s) {
        let a = capture_u32(&caps, 1)?;
        let b = capture_u32(&caps, 2)?;
        let year_raw = caps.get(3)?.as_str();
        let mut year: i32 = year_raw.parse().ok()?;
        if year_raw.len() == 2 {
            year += 2000;
        }
        let (day, month) = if a > 12 {
            (a, b)
        } else if b > 12 {
            (b, a)
        } else {
            match order {
                DateOrder::DayFirst => (a, b),
                DateOrder::MonthFirst => (b, a),
            }
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim().trim_matches('"').trim();
    if s.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}
