// ============================================================
// FLEXIBLE DATE PARSER
// ============================================================
// Best-effort parse of human-readable dates and date-times

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

// Offset-bearing layouts, normalized to UTC.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    // Offset followed by a zone abbreviation
    "%Y-%m-%d %H:%M:%S%.f %z %Z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    // US month-first wins for ambiguous slashed dates
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y, %H:%M:%S",
    "%d %b %Y, %H:%M",
    // ANSIC and Unix `date` output; %Z skips the zone abbreviation
    "%a %b %e %H:%M:%S %Y",
    "%a %b %e %H:%M:%S %Z %Y",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%m-%d-%y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%Y-%b-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const ZONE_NAMES: &[&str] = &["UTC", "GMT", "Z"];

/// Parse `raw` as a date or date-time.
///
/// Dates without a time component resolve to midnight; inputs carrying an
/// offset are converted to UTC. A trailing `UTC`, `GMT` or `Z` is read as
/// UTC. Bare year-month values resolve to the first of the month.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return four_digit_year(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return four_digit_year(dt.naive_utc());
    }

    let s = strip_zone_name(s);

    let offset = OFFSET_DATETIME_FORMATS.iter().find_map(|fmt| {
        DateTime::parse_from_str(s, fmt)
            .ok()
            .and_then(|dt| four_digit_year(dt.naive_utc()))
    });
    if offset.is_some() {
        return offset;
    }

    let naive = DATETIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .and_then(four_digit_year)
    });
    if naive.is_some() {
        return naive;
    }

    let date = DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(four_digit_year)
    });
    if date.is_some() {
        return date;
    }

    parse_year_month(s)
}

/// `%Y` takes one to four digits, so "1/2/06" fits "%Y/%m/%d" as year 1.
/// Anything outside 1000..=9999 is a misparse of a short-year layout.
fn four_digit_year(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    (1000..=9999).contains(&dt.year()).then_some(dt)
}

/// Drop a trailing zone name that follows a digit, e.g. "10:30:00 UTC"
/// or "+0000 UTC".
fn strip_zone_name(s: &str) -> &str {
    for zone in ZONE_NAMES {
        if let Some(rest) = s.strip_suffix(zone) {
            let rest = rest.trim_end();
            if rest.ends_with(|c: char| c.is_ascii_digit()) {
                return rest;
            }
        }
    }
    s
}

/// "2014-04" -> 2014-04-01
fn parse_year_month(s: &str) -> Option<NaiveDateTime> {
    let (year, month) = s.split_once('-')?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || !(1..=2).contains(&month.len()) || !all_digits(year) || !all_digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?.and_hms_opt(0, 0, 0)
}
