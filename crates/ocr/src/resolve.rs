//! Turning a [`DateCandidate`] into a [`CanonicalDate`].

use pantry_core::{CanonicalDate, DateError};

use crate::month::resolve_month;
use crate::patterns::{DateCandidate, Fields};

pub const DEFAULT_JULIAN_BASE_YEAR: i32 = 2020;

/// Two-digit years are read as 20xx.
const TWO_DIGIT_YEAR_BASE: i32 = 2000;

/// Which of the two leading fields of a trailing-year triplet is the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    MonthDay,
    DayMonth,
}

/// Month-first unless that cannot be a real date in `year`, in which case
/// day-first is tried. `05/08/2026` is always May 8.
pub fn field_order(year: i32, first: u32, second: u32) -> Option<FieldOrder> {
    if CanonicalDate::from_ymd(year, first, second).is_ok() {
        Some(FieldOrder::MonthDay)
    } else if CanonicalDate::from_ymd(year, second, first).is_ok() {
        Some(FieldOrder::DayMonth)
    } else {
        None
    }
}

/// Four-digit years are taken as-is; two-digit years land in 2000–2099.
pub fn expand_year(year: &str) -> Result<i32, DateError> {
    let value: i32 = parse_digits(year)?;
    match year.len() {
        4 => Ok(value),
        2 => Ok(TWO_DIGIT_YEAR_BASE + value),
        _ => Err(DateError::YearOutOfRange(year.to_string())),
    }
}

/// Interpret three digit groups as a date.
///
/// A leading four-digit group means year-month-day. Otherwise the last group
/// is the year and the first two are ordered by [`field_order`].
pub fn numeric_date(fields: [&str; 3]) -> Result<CanonicalDate, DateError> {
    let [a, b, c] = fields;
    if a.len() == 4 {
        return CanonicalDate::from_ymd(parse_digits(a)?, parse_digits(b)?, parse_digits(c)?);
    }

    let year = expand_year(c)?;
    let first: u32 = parse_digits(a)?;
    let second: u32 = parse_digits(b)?;
    match field_order(year, first, second) {
        Some(FieldOrder::MonthDay) => CanonicalDate::from_ymd(year, first, second),
        Some(FieldOrder::DayMonth) => CanonicalDate::from_ymd(year, second, first),
        None => Err(DateError::InvalidCalendarDate { year, month: first, day: second }),
    }
}

fn parse_digits<T: std::str::FromStr>(s: &str) -> Result<T, DateError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Malformed(s.to_string()));
    }
    s.parse().map_err(|_| DateError::Malformed(s.to_string()))
}

/// Converts candidates to dates. The only knob is the base year for Julian
/// codes; everything else is fixed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    julian_base_year: i32,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self { julian_base_year: DEFAULT_JULIAN_BASE_YEAR }
    }
}

impl DateNormalizer {
    pub fn new(julian_base_year: i32) -> Self {
        Self { julian_base_year }
    }

    pub fn julian_base_year(&self) -> i32 {
        self.julian_base_year
    }

    pub fn to_canonical(&self, candidate: &DateCandidate) -> Result<CanonicalDate, DateError> {
        match &candidate.fields {
            Fields::Numeric([a, b, c]) => numeric_date([a.as_str(), b.as_str(), c.as_str()]),
            Fields::MonthName { month, day, year } => {
                let month = resolve_month(month)
                    .ok_or_else(|| DateError::UnknownMonth(month.clone()))?
                    .number_from_month();
                let day = match day {
                    Some(d) => parse_digits(d)?,
                    None => 1,
                };
                CanonicalDate::from_ymd(expand_year(year)?, month, day)
            }
            Fields::Julian { decade, offset, day_of_year } => {
                self.julian_date(*decade, *offset, *day_of_year)
            }
        }
    }

    /// The decade digit must match the base year's decade (`2` for 2020);
    /// the offset digit is added to the base year.
    fn julian_date(&self, decade: u32, offset: u32, day_of_year: u32) -> Result<CanonicalDate, DateError> {
        let base_decade = self.julian_base_year.rem_euclid(100) / 10;
        if decade as i32 != base_decade {
            return Err(DateError::YearOutOfRange(format!("{decade}{offset}")));
        }
        // offset is a single digit, so the cast cannot wrap
        let year = self.julian_base_year + offset as i32;
        CanonicalDate::from_day_of_year(year, day_of_year)
    }
}
