use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::month::resolve_month;
use crate::text::{tokenize, TokenKind};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! month_alt {
    () => {
        "(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)"
    };
}

re!(re_numeric_trailing_year,
    r"\b(\d{1,2})[-/. ](\d{1,2})[-/. ](\d{2,4})\b");
re!(re_numeric_year_first,
    r"\b(\d{4})[-/. ](\d{1,2})[-/. ](\d{1,2})\b");
re!(re_month_day_year,
    concat!(r"(?i)\b", month_alt!(), r"[a-z]*\.?[-/ ]?(\d{1,2})[-/. ](\d{2,4})\b"));
re!(re_day_month_year,
    concat!(r"(?i)\b(\d{1,2})[-/ ]?", month_alt!(), r"[a-z]*\.?[-/. ](\d{2,4})\b"));
// The optional leading number lets a "12 aug 2026" match be recognized and
// skipped here when it is a real day, since the day-month-year recognizer
// already owns it.
re!(re_month_year,
    concat!(r"(?i)(?:\b(\d{1,2})[-/ ]?)?\b", month_alt!(), r"[a-z]*\.?[-/ ]?(\d{4})\b"));
re!(re_best_by,
    r"(?i)\bBEST\s+(?:IF\s+USED\s+BY|BY|BEFORE)(?:\s*:\s*|\s+)([A-Z]{2,4})\s+(\d{1,2})\s+(\d{2,4})\b");

// ── Candidate model ──────────────────────────────────────────────────────────

/// The recognizers, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recognizer {
    /// `08/05/26`, `8-5-2026`, `8 5 26`, `2026.08.05`.
    Numeric,
    /// `aug 7 26`, `August 07 2026`.
    MonthDayYear,
    /// `7 aug 26`, `07-AUG-2026`.
    DayMonthYear,
    /// `aug 2026`.
    MonthYear,
    /// `BEST BY OCT 14 2026`, `BEST IF USED BY DCT 14 26`.
    BestBy,
    /// `26144`: decade digit, year offset, day of year.
    Julian,
}

pub const RECOGNIZERS: [Recognizer; 6] = [
    Recognizer::Numeric,
    Recognizer::MonthDayYear,
    Recognizer::DayMonthYear,
    Recognizer::MonthYear,
    Recognizer::BestBy,
    Recognizer::Julian,
];

/// Raw digit and letter fields lifted out of a match, before any
/// interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// Three digit groups in the order they appear in the text.
    Numeric([String; 3]),
    MonthName {
        month: String,
        day: Option<String>,
        year: String,
    },
    Julian {
        decade: u32,
        offset: u32,
        day_of_year: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    pub matched: String,
    pub recognizer: Recognizer,
    pub fields: Fields,
}

impl Recognizer {
    pub fn name(self) -> &'static str {
        match self {
            Recognizer::Numeric => "numeric",
            Recognizer::MonthDayYear => "month_day_year",
            Recognizer::DayMonthYear => "day_month_year",
            Recognizer::MonthYear => "month_year",
            Recognizer::BestBy => "best_by",
            Recognizer::Julian => "julian",
        }
    }

    /// Scan the whole of `text` and append every match to `out`.
    pub fn scan(self, text: &str, out: &mut Vec<DateCandidate>) {
        let before = out.len();
        match self {
            Recognizer::Numeric => {
                scan_regex(self, re_numeric_trailing_year(), text, out, |c| {
                    if follows_year_first(text, c.get(0)?.start()) {
                        return None;
                    }
                    numeric_fields(c)
                });
                scan_regex(self, re_numeric_year_first(), text, out, numeric_fields);
            }
            Recognizer::MonthDayYear => {
                scan_regex(self, re_month_day_year(), text, out, |c| {
                    Some(Fields::MonthName {
                        month: group(c, 1)?,
                        day: Some(group(c, 2)?),
                        year: group(c, 3)?,
                    })
                });
            }
            Recognizer::DayMonthYear => {
                scan_regex(self, re_day_month_year(), text, out, |c| {
                    Some(Fields::MonthName {
                        month: group(c, 2)?,
                        day: Some(group(c, 1)?),
                        year: group(c, 3)?,
                    })
                });
            }
            Recognizer::MonthYear => {
                scan_regex(self, re_month_year(), text, out, |c| {
                    let month = group(c, 2)?;
                    let year = group(c, 3)?;
                    if let Some(day) = c.get(1) {
                        if is_day_of(day.as_str(), &month, &year) {
                            return None;
                        }
                    }
                    Some(Fields::MonthName { month, day: None, year })
                });
            }
            Recognizer::BestBy => {
                scan_regex(self, re_best_by(), text, out, |c| {
                    Some(Fields::MonthName {
                        month: group(c, 1)?,
                        day: Some(group(c, 2)?),
                        year: group(c, 3)?,
                    })
                });
            }
            Recognizer::Julian => scan_julian(text, out),
        }
        tracing::trace!(recognizer = self.name(), hits = out.len() - before, "recognizer finished");
    }
}

/// Run every recognizer over normalized text. All of them fire; duplicates
/// across recognizers are expected and resolved by the caller.
pub fn find_candidates(text: &str) -> Vec<DateCandidate> {
    let mut out = Vec::new();
    for recognizer in RECOGNIZERS {
        recognizer.scan(text, &mut out);
    }
    out
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn scan_regex(
    recognizer: Recognizer,
    re: &Regex,
    text: &str,
    out: &mut Vec<DateCandidate>,
    fields: impl Fn(&Captures<'_>) -> Option<Fields>,
) {
    for caps in re.captures_iter(text) {
        let Some(fields) = fields(&caps) else {
            continue;
        };
        out.push(DateCandidate { matched: caps[0].to_string(), recognizer, fields });
    }
}

fn group(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i).map(|m| m.as_str().to_string())
}

fn numeric_fields(caps: &Captures<'_>) -> Option<Fields> {
    Some(Fields::Numeric([group(caps, 1)?, group(caps, 2)?, group(caps, 3)?]))
}

/// True when `start` sits right after `dddd` plus a separator, i.e. inside a
/// year-first date such as `2026-08-05`.
fn follows_year_first(text: &str, start: usize) -> bool {
    let prefix = text[..start].as_bytes();
    let [.., y1, y2, y3, y4, sep] = prefix else {
        return false;
    };
    let bounded = match prefix.len() {
        5 => true,
        n => !prefix[n - 6].is_ascii_alphanumeric(),
    };
    bounded
        && matches!(sep, b'-' | b'/' | b'.' | b' ')
        && [y1, y2, y3, y4].iter().all(|b| b.is_ascii_digit())
}

/// Whether `day` names a real day of `month` in `year`.
fn is_day_of(day: &str, month: &str, year: &str) -> bool {
    let (Ok(day), Ok(year), Some(month)) =
        (day.parse::<u32>(), year.parse::<i32>(), resolve_month(month))
    else {
        return false;
    };
    NaiveDate::from_ymd_opt(year, month.number_from_month(), day).is_some()
}

/// Bare five-digit tokens: `<decade digit><year offset><day of year>`.
/// Day-of-year values outside 1–366 never become candidates.
fn scan_julian(text: &str, out: &mut Vec<DateCandidate>) {
    for token in tokenize(text) {
        if token.kind != TokenKind::Numeric || token.text.len() != 5 {
            continue;
        }
        let Some(fields) = julian_fields(&token.text) else {
            tracing::debug!(code = %token.text, "julian day of year out of range");
            continue;
        };
        out.push(DateCandidate { matched: token.text, recognizer: Recognizer::Julian, fields });
    }
}

fn julian_fields(code: &str) -> Option<Fields> {
    let decade = code.get(0..1)?.parse().ok()?;
    let offset = code.get(1..2)?.parse().ok()?;
    let day_of_year: u32 = code.get(2..5)?.parse().ok()?;
    if !(1..=366).contains(&day_of_year) {
        return None;
    }
    Some(Fields::Julian { decade, offset, day_of_year })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
