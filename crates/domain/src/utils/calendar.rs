//! Calendar and fiscal-year helpers
//!
//! The fiscal year starts in April: fiscal year `fy` runs from April `fy`
//! through March `fy + 1`. All month arithmetic goes through [`MonthKey`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::constants::{DATE_FORMAT, FISCAL_YEAR_START_MONTH, MONTHS_PER_FISCAL_YEAR};
use crate::errors::{ResplanError, Result};
use crate::types::MonthKey;

/// Month key of a date.
///
/// ```
/// use chrono::NaiveDate;
/// use resplan_domain::utils::calendar::month_key;
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
/// assert_eq!(month_key(date).to_string(), "2025-04");
/// ```
#[must_use]
pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::from_date(date)
}

/// Every month from `start` to `end`, inclusive and ascending.
///
/// Accepts dates or month keys. Empty when `start` is after `end`.
#[must_use]
pub fn month_range(start: impl Into<MonthKey>, end: impl Into<MonthKey>) -> Vec<MonthKey> {
    let (start, end) = (start.into(), end.into());
    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.next();
    }
    months
}

/// The twelve months of fiscal year `fiscal_year`, April through March.
///
/// # Errors
/// Returns `ResplanError::InvalidDate` if the year cannot form a month key.
pub fn fiscal_year_months(fiscal_year: i32) -> Result<Vec<MonthKey>> {
    let first = MonthKey::new(fiscal_year, FISCAL_YEAR_START_MONTH)?;
    Ok(std::iter::successors(Some(first), |month| Some(month.next()))
        .take(MONTHS_PER_FISCAL_YEAR)
        .collect())
}

/// Fiscal year a date belongs to: the year of the latest April 1 on or
/// before it.
#[must_use]
pub fn fiscal_year_of(date: NaiveDate) -> i32 {
    if date.month() < FISCAL_YEAR_START_MONTH {
        date.year() - 1
    } else {
        date.year()
    }
}

/// A window of months around the month of `today`.
#[must_use]
pub fn months_around(today: NaiveDate, before: u32, after: u32) -> Vec<MonthKey> {
    let current = MonthKey::from_date(today);
    // A century either way is far beyond any planning horizon.
    let before = i32::try_from(before.min(1_200)).unwrap_or_default();
    let after = i32::try_from(after.min(1_200)).unwrap_or_default();
    month_range(current.offset(-before), current.offset(after))
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a timestamp without
/// offset; the time part is discarded. Nothing else is coerced.
///
/// # Errors
/// Returns `ResplanError::InvalidDate` for anything else.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }
    Err(ResplanError::InvalidDate(format!("unrecognised date: {raw:?}")))
}
