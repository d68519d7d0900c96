//! Cleanup of raw OCR text before any pattern runs.

/// Normalize raw OCR output into a single-spaced line.
///
/// Bullets, pipes and underscores are read as `/` (the usual misreads of a
/// date separator), commas and semicolons become spaces, and a space is
/// inserted wherever a digit touches a letter so `26L141` reads `26 L 141`.
pub fn normalize_text(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + raw.len() / 4);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        let c = match c {
            '•' | '|' | '_' => '/',
            ',' | ';' => ' ',
            other => other,
        };
        if let Some(p) = prev {
            if is_kind_boundary(p, c) {
                spaced.push(' ');
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kind_boundary(prev: char, next: char) -> bool {
    (prev.is_ascii_digit() && next.is_ascii_alphabetic())
        || (prev.is_ascii_alphabetic() && next.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Alphabetic,
    Numeric,
}

/// A maximal run of ASCII letters or ASCII digits, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// Byte offset of the token in the text it was cut from.
    pub start: usize,
}

/// Split text into letter and digit runs. Everything else (punctuation,
/// emoji, non-ASCII letters) separates tokens and is otherwise ignored.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;

    for (i, c) in text.char_indices() {
        let kind = if c.is_ascii_digit() {
            Some(TokenKind::Numeric)
        } else if c.is_ascii_alphabetic() {
            Some(TokenKind::Alphabetic)
        } else {
            None
        };

        let Some(kind) = kind else {
            tokens.extend(current.take());
            continue;
        };
        match current.as_mut() {
            Some(tok) if tok.kind == kind => tok.text.push(c.to_ascii_lowercase()),
            _ => {
                tokens.extend(current.take());
                current = Some(Token { text: c.to_ascii_lowercase().to_string(), kind, start: i });
            }
        }
    }
    tokens.extend(current);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \n\t "), "");
    }

    #[test]
    fn separator_artifacts_become_slashes() {
        assert_eq!(normalize_text("08•05|26"), "08/05/26");
        assert_eq!(normalize_text("08_05_2026"), "08/05/2026");
    }

    #[test]
    fn commas_and_semicolons_become_spaces() {
        assert_eq!(normalize_text("AUG 07,2026;LOT"), "AUG 07 2026 LOT");
    }

    #[test]
    fn splits_digit_letter_boundaries() {
        assert_eq!(normalize_text("26L141"), "26 L 141");
        assert_eq!(normalize_text("EXP07AUG26"), "EXP 07 AUG 26");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_text("  BEST\n\nBY   OCT  14\t2028  "), "BEST BY OCT 14 2028");
    }

    #[test]
    fn leaves_emoji_alone() {
        assert_eq!(normalize_text("🥛 exp 2026-08-05 ✅"), "🥛 exp 2026-08-05 ✅");
    }

    #[test]
    fn tokenize_splits_by_kind() {
        let tokens = tokenize("Best by 26144!");
        let texts: Vec<_> = tokens.iter().map(|t| (t.text.as_str(), t.kind)).collect();
        assert_eq!(
            texts,
            vec![
                ("best", TokenKind::Alphabetic),
                ("by", TokenKind::Alphabetic),
                ("26144", TokenKind::Numeric),
            ]
        );
        assert_eq!(tokens[2].start, 8);
    }

    #[test]
    fn tokenize_ignores_symbols_and_non_ascii() {
        let tokens = tokenize("🥛lot·A12");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["lot", "a", "12"]);
    }
}
