use crate::config::*;
use crate::length::*;
use crate::types::*;

// ========== Semantic length ==========

#[test]
fn test_length_pure_cjk() {
    assert_eq!(semantic_length("这是中文文本测试"), 8);
}

#[test]
fn test_length_pure_latin() {
    // 4 words at 0.5 each
    assert_eq!(semantic_length("This is English test"), 2);
}

#[test]
fn test_length_mixed() {
    // 4 ideographs + ceil(2 * 0.5)
    assert_eq!(semantic_length("这是中文 and English"), 5);
}

#[test]
fn test_length_odd_word_count_rounds_up() {
    assert_eq!(semantic_length("one two three"), 2);
}

#[test]
fn test_length_numeric_runs() {
    // 共 + 人 + one numeric run
    assert_eq!(semantic_length("共100人"), 3);
    assert_eq!(semantic_length("2024 2025"), 2);
}

#[test]
fn test_length_cjk_punctuation_counts() {
    // 4 ideographs + fullwidth comma + ideographic full stop
    assert_eq!(semantic_length("你好，世界。"), 6);
}

#[test]
fn test_length_ascii_punctuation_is_free() {
    assert_eq!(semantic_length("!!! ??? ..."), 0);
}

#[test]
fn test_length_empty() {
    assert_eq!(semantic_length(""), 0);
}

#[test]
fn test_effective_length_latin_uses_char_count() {
    // semantic length 2, but 20 chars
    assert_eq!(effective_length("This is English test"), 20);
}

#[test]
fn test_effective_length_trims() {
    assert_eq!(effective_length("  hello  "), 5);
}

// ========== Word count ==========

#[test]
fn test_count_words_mixed() {
    assert_eq!(count_words("你好 world"), 3);
}

#[test]
fn test_count_words_strips_bold() {
    assert_eq!(count_words("**bold** text"), 2);
}

#[test]
fn test_count_words_keeps_link_text() {
    assert_eq!(count_words("[link text](https://example.com)"), 2);
}

#[test]
fn test_count_words_strips_fenced_code() {
    assert_eq!(count_words("before\n```\ncode here\n```\nafter"), 2);
}

#[test]
fn test_count_words_strips_html() {
    assert_eq!(count_words("<div>hello</div> world"), 2);
}

#[test]
fn test_count_words_ignores_cjk_punctuation() {
    // punctuation is not a word
    assert_eq!(count_words("你好，世界。"), 4);
}

// ========== Config ==========

#[test]
fn test_segmenter_config_defaults() {
    let cfg = SegmenterConfig::default();
    assert_eq!(cfg.max_length, 1000);
    assert_eq!(cfg.min_length, 50);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_audiobook_profile() {
    let cfg = SegmenterConfig::audiobook_profile();
    assert_eq!(cfg.max_length, 600);
    assert_eq!(cfg.target_length, 500);
    assert_eq!(cfg.min_length, 400);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_target_above_max_rejected() {
    let cfg = SegmenterConfig { target_length: 2000, ..SegmenterConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_min_above_target_rejected() {
    let cfg = SegmenterConfig {
        min_length: 900,
        target_length: 800,
        ..SegmenterConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_overlap_config_default_ratio() {
    let cfg = OverlapConfig::new(500);
    assert_eq!(cfg.overlap, 25);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_overlap_must_be_smaller_than_chunk() {
    let cfg = OverlapConfig::new(100).with_overlap(100);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_processing_options_defaults() {
    let opts = ProcessingOptions::default();
    assert!(opts.preserve_formatting);
    assert!(opts.use_smart_splitter);
    assert!(opts.forced_encoding.is_none());
}

// ========== Types ==========

#[test]
fn test_segment_type_serde_lowercase() {
    assert_eq!(serde_json::to_string(&SegmentType::Chapter).unwrap(), "\"chapter\"");
    assert_eq!(serde_json::to_string(&ContentKind::Novel).unwrap(), "\"novel\"");
}

#[test]
fn test_break_reason_serde_snake_case() {
    assert_eq!(
        serde_json::to_string(&BreakReason::MergedForBalance).unwrap(),
        "\"merged_for_balance\""
    );
}

#[test]
fn test_encoding_names() {
    assert_eq!(TextEncoding::Utf8.as_str(), "utf8");
    assert_eq!(TextEncoding::Utf16Le.as_str(), "utf16le");
    assert_eq!(TextEncoding::Gb2312.to_string(), "gb2312");
}

#[test]
fn test_segment_meta_default_is_quiet() {
    let meta = SegmentMeta::default();
    assert!(meta.break_reason.is_none());
    assert!(!meta.merged);
    assert!(meta.extra.is_null());
}

#[test]
fn test_segment_roundtrip() {
    let seg = Segment {
        order: 0,
        content: "你好。".into(),
        semantic_length: 3,
        segment_type: SegmentType::Paragraph,
        start_position: 0,
        end_position: 3,
        metadata: SegmentMeta::default(),
    };
    let json = serde_json::to_string(&seg).unwrap();
    let back: Segment = serde_json::from_str(&json).unwrap();
    assert_eq!(back.content, seg.content);
    assert_eq!(back.segment_type, SegmentType::Paragraph);
}
