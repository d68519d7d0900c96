use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine error: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrLine {
    #[serde(default)]
    pub text: String,
}

/// One text block as reported by an on-device OCR engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub lines: Vec<OcrLine>,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return recognized blocks.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<OcrBlock>, OcrError>;
}

/// Join block texts and their line texts, in order, with single spaces.
/// Blocks usually repeat their lines; the date extractor deduplicates.
pub fn flatten_blocks(blocks: &[OcrBlock]) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    for block in blocks {
        if !block.text.is_empty() {
            pieces.push(&block.text);
        }
        pieces.extend(block.lines.iter().map(|l| l.text.as_str()).filter(|t| !t.is_empty()));
    }
    pieces.join(" ")
}

// ── Static backend ────────────────────────────────────────────────────────────

/// Returns blocks that were recognized elsewhere (exported device OCR output)
/// regardless of the image passed in.
pub struct StaticRecognizer {
    pub blocks: Vec<OcrBlock>,
}

impl StaticRecognizer {
    pub fn new(blocks: Vec<OcrBlock>) -> Self {
        Self { blocks }
    }

    /// A single block holding `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![OcrBlock { text: text.into(), lines: vec![] }])
    }
}

impl OcrBackend for StaticRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<Vec<OcrBlock>, OcrError> {
        Ok(self.blocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> OcrLine {
        OcrLine { text: text.into() }
    }

    #[test]
    fn static_returns_preset_blocks() {
        let r = StaticRecognizer::from_text("BEST BY\nOCT 14 2026");
        let blocks = r.recognize(b"fake image data").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "BEST BY\nOCT 14 2026");
    }

    #[test]
    fn static_ignores_image_content() {
        let r = StaticRecognizer::from_text("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), r.recognize(b"").unwrap());
    }

    #[test]
    fn flatten_joins_blocks_then_lines() {
        let blocks = vec![
            OcrBlock { text: "BEST BY".into(), lines: vec![line("BEST"), line("BY")] },
            OcrBlock { text: String::new(), lines: vec![line(""), line("OCT 14 2026")] },
        ];
        assert_eq!(flatten_blocks(&blocks), "BEST BY BEST BY OCT 14 2026");
    }

    #[test]
    fn flatten_empty() {
        assert_eq!(flatten_blocks(&[]), "");
        assert_eq!(flatten_blocks(&[OcrBlock::default()]), "");
    }

    #[test]
    fn blocks_deserialize_with_missing_fields() {
        let blocks: Vec<OcrBlock> =
            serde_json::from_str(r#"[{"text":"EXP"},{"lines":[{"text":"26144"}]},{}]"#).unwrap();
        assert_eq!(flatten_blocks(&blocks), "EXP 26144");
    }
}
