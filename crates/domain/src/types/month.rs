//! Calendar month key
//!
//! `YYYY-MM` is the only cross-component wire format for months. The
//! newtype keeps year and month as integers so that ordering is
//! chronological by construction; the zero-padded string form sorts the
//! same way.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ResplanError, Result};

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a month key from a year and a 1-based month.
    ///
    /// # Errors
    /// Returns `ResplanError::InvalidDate` if `month` is outside `1..=12` or
    /// the year cannot be rendered with four digits.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ResplanError::InvalidDate(format!("month out of range: {year}-{month}")));
        }
        if !(0..=9999).contains(&year) {
            return Err(ResplanError::InvalidDate(format!("year out of range: {year}")));
        }
        Ok(Self { year, month })
    }

    /// Truncate a date to its calendar month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Shift by a signed number of months.
    #[must_use]
    pub const fn offset(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self { year: index.div_euclid(12), month: (index.rem_euclid(12) + 1) as u32 }
    }

    /// First day of the month.
    ///
    /// # Errors
    /// Returns `ResplanError::InvalidDate` if chrono cannot represent the date.
    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            ResplanError::InvalidDate(format!("unrepresentable month: {self}"))
        })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ResplanError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ResplanError::InvalidDate(format!("invalid month key: {s:?}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
