//! Whole-document content classification.

use ic_core::ContentKind;
use regex::Regex;
use std::sync::LazyLock;

static RE_CHAPTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第[一二三四五六七八九十百千万\d]+[章节卷篇部]|Chapter\s+\d+").unwrap()
});
static RE_BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

fn is_dialogue_quote(c: char) -> bool {
    matches!(c, '“' | '”' | '「' | '」')
}

/// Classify a document. Advisory: recorded alongside segments and used to
/// pick the separator cascade in the windowed splitter; it does not change
/// the core splitter's mechanics.
///
/// Ordered heuristics: heavy dialogue quoting, then chapter markers, then
/// many short paragraphs, then general.
pub fn detect_content_type(content: &str) -> ContentKind {
    let total = content.chars().count();
    if total == 0 {
        return ContentKind::General;
    }

    let quote_count = content.chars().filter(|c| is_dialogue_quote(*c)).count();
    if quote_count as f64 / total as f64 > 0.05 {
        return ContentKind::Dialogue;
    }

    if RE_CHAPTER_MARKER.is_match(content) {
        return ContentKind::Novel;
    }

    let paragraph_count = RE_BLANK_LINE.split(content).count();
    if paragraph_count > 5 && total / paragraph_count < 500 {
        return ContentKind::Article;
    }

    ContentKind::General
}
