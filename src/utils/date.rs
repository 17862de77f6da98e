//! Calendar dates for note metadata.
//!
//! Notes carry plain `YYYY-MM-DD` dates. Typst serializes `datetime` values
//! in query output as their repr (`datetime(year: 2024, month: 6, day: 15)`),
//! which [`parse_typst_datetime`] turns back into ISO form.
//!
//! # Examples
//!
//! ```ignore
//! let date = NoteDate::parse("2024-06-15").unwrap();
//! assert_eq!(date.to_string(), "2024-06-15");
//! assert_eq!(date.format("%d.%m.%Y"), "15.06.2024");
//! ```

use anyhow::{Result, bail};
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt::{self, Write};

/// A validated calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoteDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl NoteDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Today's date in the local timezone.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self::new(now.year() as u16, now.month() as u8, now.day() as u8)
    }

    /// Parse from "YYYY-MM-DD".
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let date = Self::new(
            parse_u16(&bytes[0..4])?,
            parse_u8(&bytes[5..7])?,
            parse_u8(&bytes[8..10])?,
        );
        date.validate().ok()?;
        Some(date)
    }

    pub fn validate(&self) -> Result<()> {
        let Self { year, month, day } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }
        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        Ok(())
    }

    /// Format with a strftime pattern (e.g. `%Y-%m-%d`).
    ///
    /// Falls back to `YYYY-MM-DD` when the pattern cannot be applied to a
    /// plain date (time or timezone specifiers).
    pub fn format(&self, pattern: &str) -> String {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .and_then(|date| format_date(date, pattern).ok())
        .unwrap_or_else(|| self.to_string())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)]
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Check that a strftime pattern only contains date specifiers.
pub fn validate_date_format(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        bail!("date format is empty");
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        bail!("invalid date format `{pattern}`");
    }
    // `%H`, `%Z` and friends parse fine but have nothing to format on a date
    let sample = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    if format_date(sample, pattern).is_err() {
        bail!("date format `{pattern}` uses time or timezone specifiers");
    }
    Ok(())
}

/// `NaiveDate::format` through `write!`, so unsupported items surface as
/// an error instead of a panic in `to_string`.
fn format_date(date: NaiveDate, pattern: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))?;
    Ok(out)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

/// Parse Typst datetime repr format.
///
/// Handles both single-line and multi-line formats:
/// - `datetime(year: 2024, month: 6, day: 15)`
/// - `datetime(\n  year: 2024,\n  month: 6,\n  day: 15,\n  hour: 14,\n  ...)`
///
/// Returns the calendar date as "YYYY-MM-DD"; time components are dropped
/// since notes are dated by day.
pub fn parse_typst_datetime(s: &str) -> Option<String> {
    let s = s.trim();
    let inner = s.strip_prefix("datetime(")?.strip_suffix(')')?;

    let mut year: Option<u16> = None;
    let mut month: Option<u8> = None;
    let mut day: Option<u8> = None;

    for part in inner.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (key, value) = part.split_once(':')?;
        let value = value.trim();
        match key.trim() {
            "year" => year = value.parse().ok(),
            "month" => month = value.parse().ok(),
            "day" => day = value.parse().ok(),
            _ => {}
        }
    }

    let date = NoteDate::new(year?, month?, day?);
    date.validate().ok()?;
    Some(date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = NoteDate::parse("2024-06-15").unwrap();
        assert_eq!(date, NoteDate::new(2024, 6, 15));
        assert_eq!(date.to_string(), "2024-06-15");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(NoteDate::parse("2024-6-15").is_none());
        assert!(NoteDate::parse("2024-13-01").is_none());
        assert!(NoteDate::parse("2023-02-29").is_none());
        assert!(NoteDate::parse("2024-06-15T10:00:00Z").is_none());
        assert!(NoteDate::parse("yesterday").is_none());
    }

    #[test]
    fn test_leap_year() {
        assert!(NoteDate::new(2024, 2, 29).validate().is_ok());
        assert!(NoteDate::new(2000, 2, 29).validate().is_ok());
        assert!(NoteDate::new(1900, 2, 29).validate().is_err());
    }

    #[test]
    fn test_today_is_valid() {
        let today = NoteDate::today();
        assert!(today.validate().is_ok());
        assert_eq!(NoteDate::parse(&today.to_string()), Some(today));
    }

    #[test]
    fn test_format() {
        let date = NoteDate::new(2024, 6, 5);
        assert_eq!(date.format("%Y-%m-%d"), "2024-06-05");
        assert_eq!(date.format("%d.%m.%Y"), "05.06.2024");
        assert_eq!(date.format("%Y%m%d"), "20240605");
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%Y/%j").is_ok());
        assert!(validate_date_format("").is_err());
        assert!(validate_date_format("%Q").is_err());
        assert!(validate_date_format("%Y-%m-%d_%H%M").is_err());
        assert!(validate_date_format("%Z").is_err());
    }

    #[test]
    fn test_format_with_time_specifier_falls_back() {
        let date = NoteDate::new(2024, 6, 15);
        assert_eq!(date.format("%Y-%m-%d_%H%M"), "2024-06-15");
    }

    #[test]
    fn test_parse_typst_datetime_date_only() {
        let input = "datetime(year: 2024, month: 6, day: 15)";
        assert_eq!(parse_typst_datetime(input), Some("2024-06-15".to_string()));
    }

    #[test]
    fn test_parse_typst_datetime_with_time() {
        let input = "datetime(\n  year: 2024,\n  month: 6,\n  day: 15,\n  hour: 14,\n  minute: 30,\n  second: 45,\n)";
        assert_eq!(parse_typst_datetime(input), Some("2024-06-15".to_string()));
    }

    #[test]
    fn test_parse_typst_datetime_invalid() {
        assert_eq!(parse_typst_datetime("2024-06-15"), None);
        assert_eq!(parse_typst_datetime("datetime()"), None);
        assert_eq!(parse_typst_datetime("datetime(year: 2024)"), None);
        assert_eq!(
            parse_typst_datetime("datetime(year: 2024, month: 2, day: 30)"),
            None
        );
    }
}
