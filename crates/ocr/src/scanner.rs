use pantry_core::{CanonicalDate, ResultSet};
use serde::Serialize;
use thiserror::Error;

use crate::extract::Strategy;
use crate::recognizer::{flatten_blocks, OcrBackend, OcrError};

/// Characters of recognized text echoed in the log when nothing is found.
const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of scanning one still image.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Flattened OCR text the dates were read from.
    pub text: String,
    pub dates: ResultSet,
}

impl ScanOutcome {
    /// The date a scanning screen would preselect.
    pub fn first(&self) -> Option<CanonicalDate> {
        self.dates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Orchestrates: OCR → flatten blocks → date extraction.
pub struct ExpirationScanner<R: OcrBackend> {
    recognizer: R,
    strategy: Strategy,
}

impl<R: OcrBackend> ExpirationScanner<R> {
    pub fn new(recognizer: R, strategy: Strategy) -> Self {
        Self { recognizer, strategy }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Scan raw image bytes (from camera capture or file read).
    pub fn scan(&self, image_bytes: &[u8]) -> Result<ScanOutcome, ScanError> {
        let blocks = self.recognizer.recognize(image_bytes)?;
        let text = flatten_blocks(&blocks);
        let dates = self.strategy.extract(&text);

        if dates.is_empty() {
            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            tracing::info!(policy = %self.strategy.policy(), %preview, "no date found");
        } else {
            tracing::info!(policy = %self.strategy.policy(), count = dates.len(), "dates found");
        }

        Ok(ScanOutcome { text, dates })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
