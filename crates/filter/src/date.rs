//! Tolerant date parsing shared by every caller that reads `expires`.
//!
//! Two stages: a generic parse over unambiguous layouts (ISO-8601 and friends), then an
//! explicit `DD/MM/YYYY` split on `/`. Slashed numeric dates never go through the
//! generic stage, so `02/10/2026` is always the 2nd of October.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const YEAR_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const YEAR_FIRST_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const TEXT_MONTH_FORMATS: &[&str] = &["%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// chrono's `%Y` accepts one to four digits, so `12/10/26` would read as year 12.
/// Year-first layouts are only tried when the input really starts with four digits.
fn starts_with_full_year(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && !bytes[4].is_ascii_digit()
}

/// Generic stage. Date-only inputs resolve to midnight.
pub fn parse_generic(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if starts_with_full_year(s) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        for fmt in YEAR_FIRST_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        for fmt in YEAR_FIRST_DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
        return None;
    }
    TEXT_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Explicit `day/month/year` stage. Out-of-range parts (31/02/2026) fail.
pub fn parse_day_month_year(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Generic parse, then `DD/MM/YYYY`. `None` means both stages failed.
pub fn parse_tolerant(input: &str) -> Option<NaiveDateTime> {
    parse_generic(input).or_else(|| parse_day_month_year(input).and_then(|d| d.and_hms_opt(0, 0, 0)))
}
