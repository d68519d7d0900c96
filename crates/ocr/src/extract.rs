use std::sync::OnceLock;

use chrono::NaiveDate;
use pantry_core::{CanonicalDate, ResultSet};
use regex::Regex;
use tracing::debug;

use crate::config::ExtractionPolicy;
use crate::filter::{default_horizon, ValidityFilter};
use crate::patterns::find_candidates;
use crate::resolve::{numeric_date, DateNormalizer};
use crate::text::normalize_text;

re!(re_raw_numeric,
    r"\b(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|20\d{2}[/\-.]\d{1,2}[/\-.]\d{1,2})\b");

// ── Permissive extractor ─────────────────────────────────────────────────────

/// Multi-pattern extractor. Every recognizer runs, and any date that can be
/// built is kept, however old or far away.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor {
    normalizer: DateNormalizer,
}

impl DateExtractor {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn new(normalizer: DateNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn filter(&self) -> ValidityFilter {
        ValidityFilter::Permissive
    }

    /// Extract every date found in raw OCR text. Never fails; text with no
    /// recognizable date gives an empty set.
    pub fn extract(&self, raw: &str) -> ResultSet {
        let text = normalize_text(raw);
        let mut dates = ResultSet::new();
        if text.is_empty() {
            return dates;
        }

        let filter = self.filter();
        for candidate in find_candidates(&text) {
            match self.normalizer.to_canonical(&candidate) {
                Ok(date) if filter.is_plausible(date) => {
                    dates.insert(date);
                }
                Ok(date) => debug!(%date, "date outside plausible window"),
                Err(e) => debug!(
                    matched = %candidate.matched,
                    recognizer = candidate.recognizer.name(),
                    "dropped candidate: {e}"
                ),
            }
        }
        dates
    }
}

// ── Bounded normalizer ───────────────────────────────────────────────────────

/// Normalizer for lists of raw numeric matches such as `08/05/26`. Results
/// must fall between today and the horizon.
#[derive(Debug, Clone, Copy)]
pub struct BoundedNormalizer {
    filter: ValidityFilter,
}

impl BoundedNormalizer {
    pub fn new(today: NaiveDate, horizon: NaiveDate) -> Self {
        let filter = ValidityFilter::bounded(today, horizon);
        if let ValidityFilter::Bounded(window) = filter {
            if window.is_empty() {
                tracing::warn!(%window, "horizon is before today; every date will be rejected");
            }
        }
        Self { filter }
    }

    /// Bounded by `today` and the default horizon, 2035-01-01.
    pub fn from_today(today: NaiveDate) -> Self {
        Self::new(today, default_horizon())
    }

    pub fn filter(&self) -> ValidityFilter {
        self.filter
    }

    /// Normalize one raw match. `.` and `-` count as `/`; at least three
    /// digit groups are required and any beyond the third are ignored.
    pub fn normalize(&self, raw: &str) -> Option<CanonicalDate> {
        let cleaned: String = raw
            .trim()
            .chars()
            .map(|c| if c == '.' || c == '-' { '/' } else { c })
            .collect();
        let parts: Vec<&str> = cleaned.split('/').map(str::trim).collect();
        if parts.len() < 3 {
            debug!(raw, "too few date fields");
            return None;
        }

        match numeric_date([parts[0], parts[1], parts[2]]) {
            Ok(date) if self.filter.is_plausible(date) => Some(date),
            Ok(date) => {
                debug!(%date, "date outside plausible window");
                None
            }
            Err(e) => {
                debug!(raw, "dropped raw match: {e}");
                None
            }
        }
    }

    pub fn normalize_all<I>(&self, raws: I) -> ResultSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        raws.into_iter()
            .filter_map(|raw| self.normalize(raw.as_ref()))
            .collect()
    }

    /// Pull raw numeric matches out of OCR text, then normalize them.
    pub fn extract(&self, raw: &str) -> ResultSet {
        self.normalize_all(find_raw_matches(&normalize_text(raw)))
    }
}

/// Numeric date-looking substrings: `08/05/26`, `8-5-2026`, `2026.08.05`.
pub fn find_raw_matches(text: &str) -> Vec<String> {
    re_raw_numeric()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ── Strategy selection ───────────────────────────────────────────────────────

/// One of the two extraction behaviours, chosen by configuration.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Permissive(DateExtractor),
    Bounded(BoundedNormalizer),
}

impl Strategy {
    pub fn policy(&self) -> ExtractionPolicy {
        match self {
            Strategy::Permissive(_) => ExtractionPolicy::Permissive,
            Strategy::Bounded(_) => ExtractionPolicy::Bounded,
        }
    }

    pub fn extract(&self, raw: &str) -> ResultSet {
        match self {
            Strategy::Permissive(extractor) => extractor.extract(raw),
            Strategy::Bounded(normalizer) => normalizer.extract(raw),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
