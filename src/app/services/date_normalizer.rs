//! Event date normalization
//!
//! Event sheets write dates by hand, either as `"12 mayo 2024"` or as
//! `"12/5/2024"`. This module turns both into a comparable [`NaiveDate`].
//! Parsing is total because sort comparators call it unconditionally: anything
//! unrecognized becomes the Unix epoch, which sorts last when ordering events
//! newest first.

use chrono::NaiveDate;

/// Spanish month names, January first
const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Date returned for anything that cannot be parsed
pub fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Whether a parsed date is the unparseable sentinel
pub fn is_epoch(date: NaiveDate) -> bool {
    date == epoch()
}

/// Parse an event date in either supported shape
///
/// - `"D <month> YYYY"` with a Spanish month name in any case
/// - `"D/M/YYYY"`
///
/// Unknown month names, non-numeric parts, impossible calendar dates and any
/// other shape yield [`epoch`].
pub fn parse_date(text: &str) -> NaiveDate {
    let parts: Vec<&str> = text.split(' ').collect();

    if parts.len() == 3 {
        return parse_word_form(parts[0], parts[1], parts[2]).unwrap_or_else(epoch);
    }

    if text.contains('/') {
        return parse_slash_form(text).unwrap_or_else(epoch);
    }

    epoch()
}

/// Zero-based month index of a Spanish month name
pub fn month_index(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|month| *month == lowered)
        .map(|index| index as u32)
}

fn parse_word_form(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let month = month_index(month)?;
    let day = day.trim().parse::<u32>().ok()?;
    let year = year.trim().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

fn parse_slash_form(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let day = day.trim().parse::<u32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    let year = year.trim().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
