//! Expiration-date extraction from OCR text scraped off food packaging.
//!
//! Raw text is normalized, scanned by every date recognizer, each hit is
//! turned into a calendar date, and the survivors of the validity filter are
//! returned as a deduplicated [`ResultSet`](pantry_core::ResultSet).

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod config;
pub mod extract;
pub mod filter;
pub mod month;
pub mod patterns;
pub mod recognizer;
pub mod resolve;
pub mod scanner;
pub mod text;

pub use config::{ConfigError, ExtractionPolicy, ExtractorConfig};
pub use extract::{find_raw_matches, BoundedNormalizer, DateExtractor, Strategy};
pub use filter::{default_horizon, ValidityFilter};
pub use month::resolve_month;
pub use patterns::{find_candidates, DateCandidate, Fields, Recognizer};
pub use recognizer::{flatten_blocks, OcrBackend, OcrBlock, OcrError, OcrLine, StaticRecognizer};
pub use resolve::{field_order, DateNormalizer, FieldOrder};
pub use scanner::{ExpirationScanner, ScanError, ScanOutcome};
pub use text::normalize_text;
