use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CanonicalDate;

/// Inclusive range of dates an expiration date may plausibly fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl fmt::Display for ExpiryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.earliest, self.latest)
    }
}

impl ExpiryWindow {
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Self {
        ExpiryWindow { earliest, latest }
    }

    pub fn contains(self, date: CanonicalDate) -> bool {
        let date = date.as_naive();
        date >= self.earliest && date <= self.latest
    }

    /// A window whose start lies after its end admits nothing.
    pub fn is_empty(self) -> bool {
        self.earliest > self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn canonical(y: i32, m: u32, d: u32) -> CanonicalDate {
        CanonicalDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn contains_is_inclusive() {
        let window = ExpiryWindow::new(ymd(2025, 6, 1), ymd(2035, 1, 1));
        assert!(window.contains(canonical(2025, 6, 1))); // inclusive start
        assert!(window.contains(canonical(2035, 1, 1))); // inclusive end
        assert!(window.contains(canonical(2030, 3, 15)));
        assert!(!window.contains(canonical(2025, 5, 31)));
        assert!(!window.contains(canonical(2035, 1, 2)));
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = ExpiryWindow::new(ymd(2036, 1, 1), ymd(2035, 1, 1));
        assert!(window.is_empty());
        assert!(!window.contains(canonical(2035, 6, 1)));
    }

    #[test]
    fn display() {
        let window = ExpiryWindow::new(ymd(2025, 1, 1), ymd(2035, 1, 1));
        assert_eq!(window.to_string(), "2025-01-01 to 2035-01-01");
    }
}
