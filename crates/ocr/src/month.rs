//! Month token resolution with single-substitution OCR correction.

use chrono::Month;

/// Abbreviation table. `SEPT` is the only alias longer than three letters.
const MONTH_TABLE: [(&str, Month); 13] = [
    ("JAN", Month::January),
    ("FEB", Month::February),
    ("MAR", Month::March),
    ("APR", Month::April),
    ("MAY", Month::May),
    ("JUN", Month::June),
    ("JUL", Month::July),
    ("AUG", Month::August),
    ("SEP", Month::September),
    ("SEPT", Month::September),
    ("OCT", Month::October),
    ("NOV", Month::November),
    ("DEC", Month::December),
];

/// Resolve a month token such as `aug`, `Sept.` or the misread `DCT`.
///
/// Exact table hits win. A three-letter token that is not in the table is
/// corrected to the unique abbreviation one substitution away; a tie between
/// two abbreviations resolves to nothing.
pub fn resolve_month(token: &str) -> Option<Month> {
    let clean: String = token
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if let Some(month) = exact_month(&clean) {
        return Some(month);
    }
    if clean.len() != 3 {
        return None;
    }
    closest_month(&clean)
}

fn exact_month(clean: &str) -> Option<Month> {
    MONTH_TABLE
        .iter()
        .find(|(key, _)| *key == clean)
        .map(|(_, month)| *month)
}

/// Count of differing positions between equal-length ASCII strings.
/// `None` when the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count())
}

/// Nearest three-letter abbreviation, accepted only when it is the single
/// best match and at most one substitution away.
pub fn closest_month(clean: &str) -> Option<Month> {
    let mut best: Option<(usize, Month)> = None;
    let mut tied = false;

    for (key, month) in MONTH_TABLE.iter().filter(|(key, _)| key.len() == 3) {
        let Some(distance) = hamming_distance(clean, key) else {
            continue;
        };
        match best {
            Some((best_distance, _)) if distance > best_distance => {}
            Some((best_distance, _)) if distance == best_distance => tied = true,
            _ => {
                best = Some((distance, *month));
                tied = false;
            }
        }
    }

    match best {
        Some((distance, month)) if distance <= 1 && !tied => Some(month),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_abbreviations() {
        assert_eq!(resolve_month("jan"), Some(Month::January));
        assert_eq!(resolve_month("DEC"), Some(Month::December));
        assert_eq!(resolve_month("Sept."), Some(Month::September));
        assert_eq!(resolve_month("sep"), Some(Month::September));
    }

    #[test]
    fn strips_non_letters_before_matching() {
        assert_eq!(resolve_month("o.c.t"), Some(Month::October));
        assert_eq!(resolve_month("(nov)"), Some(Month::November));
    }

    #[test]
    fn corrects_single_substitution() {
        assert_eq!(resolve_month("DCT"), Some(Month::October));
        assert_eq!(resolve_month("AUC"), Some(Month::August));
        // Digits are stripped, leaving too few letters to correct.
        assert_eq!(resolve_month("N0V"), None);
    }

    #[test]
    fn ambiguous_correction_is_refused() {
        // JUN and JUL are both one substitution from JUX.
        assert_eq!(resolve_month("JUX"), None);
        // MAR and MAY are both one substitution from MAX.
        assert_eq!(resolve_month("MAX"), None);
    }

    #[test]
    fn two_substitutions_are_too_far() {
        assert_eq!(resolve_month("XYZ"), None);
        assert_eq!(resolve_month("OXX"), None);
    }

    #[test]
    fn other_lengths_fail_without_exact_hit() {
        assert_eq!(resolve_month("AU"), None);
        assert_eq!(resolve_month("AUGUST"), None);
        assert_eq!(resolve_month("SEPX"), None);
        assert_eq!(resolve_month(""), None);
    }

    #[test]
    fn hamming_distance_requires_equal_length() {
        assert_eq!(hamming_distance("DCT", "OCT"), Some(1));
        assert_eq!(hamming_distance("OCT", "OCT"), Some(0));
        assert_eq!(hamming_distance("DCT", "DEC"), Some(2));
        assert_eq!(hamming_distance("SEPT", "SEP"), None);
    }

    #[test]
    fn closest_month_never_returns_a_tie() {
        assert_eq!(closest_month("JUX"), None);
        assert_eq!(closest_month("OCT"), Some(Month::October));
    }
}
