use chrono::NaiveDate;
use pantry_core::{CanonicalDate, ExpiryWindow};

/// Latest expiration date the bounded policy accepts (inclusive).
pub fn default_horizon() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 1, 1).expect("valid constant date")
}

/// Plausibility check applied to every constructed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityFilter {
    /// Any real calendar date passes.
    Permissive,
    /// Only dates from today up to the horizon pass.
    Bounded(ExpiryWindow),
}

impl ValidityFilter {
    pub fn bounded(today: NaiveDate, horizon: NaiveDate) -> Self {
        ValidityFilter::Bounded(ExpiryWindow::new(today, horizon))
    }

    pub fn is_plausible(&self, date: CanonicalDate) -> bool {
        match self {
            ValidityFilter::Permissive => true,
            ValidityFilter::Bounded(window) => window.contains(date),
        }
    }
}
