use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a date candidate can be dropped on its way to a [`CanonicalDate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },
    #[error("unknown month token: '{0}'")]
    UnknownMonth(String),
    #[error("year out of range: '{0}'")]
    YearOutOfRange(String),
    #[error("day of year out of range: {0}")]
    DayOfYearOutOfRange(u32),
    #[error("malformed date: '{0}'")]
    Malformed(String),
}

/// A real calendar date with a four-digit year, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    pub const MIN_YEAR: i32 = 1;
    pub const MAX_YEAR: i32 = 9999;

    /// Build a date from its parts. Impossible combinations (April 31,
    /// February 30 outside leap years, month 13) are rejected, never clamped.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(DateError::InvalidCalendarDate { year, month, day });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CanonicalDate)
            .ok_or(DateError::InvalidCalendarDate { year, month, day })
    }

    /// January 1 of `year` plus `day_of_year - 1` days. Day 366 of a common
    /// year rolls over into January 1 of the following year.
    pub fn from_day_of_year(year: i32, day_of_year: u32) -> Result<Self, DateError> {
        if !(1..=366).contains(&day_of_year) {
            return Err(DateError::DayOfYearOutOfRange(day_of_year));
        }
        let jan_first = Self::from_ymd(year, 1, 1)?;
        let date = jan_first
            .0
            .checked_add_days(Days::new(u64::from(day_of_year - 1)))
            .ok_or(DateError::DayOfYearOutOfRange(day_of_year))?;
        Self::from_naive(date)
    }

    pub fn from_naive(date: NaiveDate) -> Result<Self, DateError> {
        Self::from_ymd(date.year(), date.month(), date.day())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CanonicalDate {
    type Err = DateError;

    /// Strict `YYYY-MM-DD`; anything else is `Malformed`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DateError::Malformed(s.to_string());
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(malformed());
        }
        let year: i32 = s[0..4].parse().map_err(|_| malformed())?;
        let month: u32 = s[5..7].parse().map_err(|_| malformed())?;
        let day: u32 = s[8..10].parse().map_err(|_| malformed())?;
        Self::from_ymd(year, month, day)
    }
}

impl From<CanonicalDate> for NaiveDate {
    fn from(date: CanonicalDate) -> Self {
        date.0
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_zero_padded() {
        let d = CanonicalDate::from_ymd(2026, 8, 5).unwrap();
        assert_eq!(d.to_string(), "2026-08-05");
        let d = CanonicalDate::from_ymd(7, 1, 2).unwrap();
        assert_eq!(d.to_string(), "0007-01-02");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            CanonicalDate::from_ymd(2026, 4, 31),
            Err(DateError::InvalidCalendarDate { year: 2026, month: 4, day: 31 })
        );
        assert!(CanonicalDate::from_ymd(2026, 2, 29).is_err());
        assert!(CanonicalDate::from_ymd(2028, 2, 29).is_ok());
        assert!(CanonicalDate::from_ymd(2026, 13, 1).is_err());
        assert!(CanonicalDate::from_ymd(2026, 0, 1).is_err());
        assert!(CanonicalDate::from_ymd(2026, 1, 0).is_err());
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        assert!(CanonicalDate::from_ymd(0, 1, 1).is_err());
        assert!(CanonicalDate::from_ymd(10_000, 1, 1).is_err());
    }

    #[test]
    fn day_of_year_offsets_from_january_first() {
        assert_eq!(CanonicalDate::from_day_of_year(2026, 1).unwrap().to_string(), "2026-01-01");
        assert_eq!(CanonicalDate::from_day_of_year(2026, 144).unwrap().to_string(), "2026-05-24");
        assert_eq!(CanonicalDate::from_day_of_year(2024, 60).unwrap().to_string(), "2024-02-29");
        assert_eq!(CanonicalDate::from_day_of_year(2024, 366).unwrap().to_string(), "2024-12-31");
    }

    #[test]
    fn day_366_of_common_year_rolls_over() {
        assert_eq!(CanonicalDate::from_day_of_year(2026, 366).unwrap().to_string(), "2027-01-01");
    }

    #[test]
    fn day_of_year_bounds() {
        assert_eq!(
            CanonicalDate::from_day_of_year(2026, 0),
            Err(DateError::DayOfYearOutOfRange(0))
        );
        assert_eq!(
            CanonicalDate::from_day_of_year(2026, 367),
            Err(DateError::DayOfYearOutOfRange(367))
        );
    }

    #[test]
    fn parse_strict_iso() {
        let d: CanonicalDate = "2028-10-14".parse().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2028, 10, 14));
        assert!("2028-1-14".parse::<CanonicalDate>().is_err());
        assert!("2028/10/14".parse::<CanonicalDate>().is_err());
        assert!("2028-02-30".parse::<CanonicalDate>().is_err());
        assert!("+028-10-14".parse::<CanonicalDate>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let d = CanonicalDate::from_ymd(2026, 5, 24).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2026-05-24\"");
        let back: CanonicalDate = serde_json::from_str("\"2026-05-24\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CanonicalDate>("\"2026-02-31\"").is_err());
    }

    #[test]
    fn ordering_follows_calendar() {
        let a = CanonicalDate::from_ymd(2026, 1, 31).unwrap();
        let b = CanonicalDate::from_ymd(2026, 2, 1).unwrap();
        assert!(a < b);
    }
}
