//! Text cleaning — control characters, line endings, whitespace, NFC.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static RE_HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// C0 controls and DEL, minus tab/newline/carriage-return.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{7F}')
}

/// Clean decoded text.
///
/// Always: leading BOM strip, control-char strip, `\r\n`/`\r` → `\n`,
/// NFC normalization. With `preserve_formatting` false, additionally
/// collapses horizontal whitespace runs, caps blank runs at one empty
/// line, and trims the ends.
pub fn clean_text(text: &str, preserve_formatting: bool) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let mut cleaned: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();
    cleaned = cleaned.replace("\r\n", "\n").replace('\r', "\n");

    if !preserve_formatting {
        cleaned = RE_HORIZONTAL_WS.replace_all(&cleaned, " ").into_owned();
        cleaned = RE_MULTI_NEWLINE.replace_all(&cleaned, "\n\n").into_owned();
        cleaned = cleaned.trim().to_string();
    }

    // A precomposed/decomposed mismatch must never affect length counting
    // or pattern matching downstream.
    cleaned.nfc().collect()
}
