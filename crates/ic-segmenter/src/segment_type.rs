//! Per-segment structural classification.

use ic_core::SegmentType;
use regex::Regex;
use std::sync::LazyLock;

static RE_CHAPTER_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:第[一二三四五六七八九十百千万\d]+[章节卷篇部]|Chapter\s+\d+|#{1,3}\s+)")
        .unwrap()
});
static RE_SCENE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:场景|地点|时间|环境|室内|室外)").unwrap());
static RE_STAGE_DIRECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\n]*\]$").unwrap());

fn is_dialogue_quote(c: char) -> bool {
    matches!(c, '“' | '”' | '「' | '」')
}

/// Classify one final segment: chapter heading, then scene descriptor,
/// then dialogue density, then plain paragraph.
pub fn detect_segment_type(content: &str) -> SegmentType {
    if RE_CHAPTER_HEAD.is_match(content) {
        return SegmentType::Chapter;
    }

    if RE_SCENE_HEAD.is_match(content)
        || RE_STAGE_DIRECTION.is_match(content)
        || content.contains("场景：")
        || content.contains("环境：")
    {
        return SegmentType::Scene;
    }

    let total = content.chars().count();
    let quotes = content.chars().filter(|c| is_dialogue_quote(*c)).count();
    if total > 0 && quotes > 0 && quotes as f64 / total as f64 > 0.1 {
        return SegmentType::Dialogue;
    }

    SegmentType::Paragraph
}

/// At least one quoted span.
pub fn has_dialogue(content: &str) -> bool {
    content.chars().filter(|c| is_dialogue_quote(*c)).count() >= 2
}

/// Any CJK clause punctuation — a proxy for narrative description.
pub fn has_description(content: &str) -> bool {
    content.chars().any(|c| matches!(c, '，' | '。' | '！' | '？' | '；' | '：'))
}
