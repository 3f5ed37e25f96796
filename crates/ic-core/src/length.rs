//! Semantic length — the metric every split decision compares against.
//!
//! CJK code points carry far more information per character than Latin
//! words, so raw `len()` would bias against English-heavy segments.

use regex::Regex;
use std::sync::LazyLock;

static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RE_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]*)\*\*").unwrap());
static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]*)\*").unwrap());

/// CJK in the wide sense: ideographs, CJK symbols/punctuation, and
/// fullwidth/halfwidth forms. Each counts as one semantic unit.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3000}'..='\u{303F}'
        | '\u{FF00}'..='\u{FFEF}')
}

/// CJK ideographs only — the word-count metric ignores CJK punctuation.
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

/// Weighted length: 1 per CJK char, 0.5 per Latin word (rounded up in
/// aggregate), 1 per numeric run, 0 for everything else.
pub fn semantic_length(text: &str) -> usize {
    let mut cjk = 0usize;
    let mut latin_words = 0usize;
    let mut numeric_runs = 0usize;
    let mut in_word = false;
    let mut in_number = false;

    for c in text.chars() {
        if is_cjk(c) {
            cjk += 1;
            in_word = false;
            in_number = false;
        } else if c.is_ascii_alphabetic() {
            if !in_word {
                latin_words += 1;
            }
            in_word = true;
            in_number = false;
        } else if c.is_ascii_digit() {
            if !in_number {
                numeric_runs += 1;
            }
            in_number = true;
            in_word = false;
        } else {
            in_word = false;
            in_number = false;
        }
    }

    cjk + latin_words.div_ceil(2) + numeric_runs
}

/// Word count for statistics (never for split decisions): CJK ideographs
/// and Latin words each count 1, after stripping HTML and markdown markup.
pub fn count_words(text: &str) -> usize {
    let stripped = RE_HTML_TAG.replace_all(text, "");
    let stripped = RE_FENCED_CODE.replace_all(&stripped, "");
    let stripped = RE_INLINE_CODE.replace_all(&stripped, "");
    let stripped = RE_LINK.replace_all(&stripped, "$1");
    let stripped = RE_HEADING.replace_all(&stripped, "");
    let stripped = RE_BOLD.replace_all(&stripped, "$1");
    let stripped = RE_ITALIC.replace_all(&stripped, "$1");

    let mut count = 0usize;
    let mut in_word = false;
    for c in stripped.chars() {
        if is_cjk_ideograph(c) {
            count += 1;
            in_word = false;
        } else if c.is_ascii_alphabetic() {
            if !in_word {
                count += 1;
            }
            in_word = true;
        } else {
            in_word = false;
        }
    }
    count
}

/// The measure compared against length thresholds: the larger of the
/// semantic length and the trimmed char count. Guards against text that
/// scores near zero semantically (pure punctuation, whitespace runs) but
/// still occupies space.
pub fn effective_length(text: &str) -> usize {
    let trimmed = text.trim();
    semantic_length(trimmed).max(trimmed.chars().count())
}
