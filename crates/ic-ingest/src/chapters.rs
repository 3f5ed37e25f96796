//! Chapter slicing: heading detection, preface/fallback handling, and
//! global position bookkeeping across per-chapter segmentation.

use std::collections::HashMap;

use ic_core::{count_words, IcError, ProcessingOptions, Result, Segment, SegmentType};
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;
use tracing::debug;

use crate::pipeline::segment_content;

static RE_CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    let patterns = [
        r"#{1,6}\s+.+",
        r"第[零一二三四五六七八九十百千万两\d]+[章节卷篇回部][^\n]*",
        r"第\s*\d+\s*(?:章|节)[^\n]*",
        r"Chapter\s+\d+[^\n]*",
        r"Section\s+\d+[^\n]*",
        r"Part\s+\d+[^\n]*",
    ];
    Regex::new(&format!(r"(?mi)^(?:{})\s*$", patterns.join("|"))).unwrap()
});

static RE_HEADING_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s*").unwrap());
static RE_TITLE_LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-:：、.]+").unwrap());
static RE_TITLE_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-:：、.]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Detected,
    Preface,
    Fallback,
}

/// One chapter's worth of source text.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSlice {
    pub index: usize,
    pub title: String,
    pub raw_title: String,
    pub heading: Option<String>,
    pub body: String,
    pub detection_method: DetectionMethod,
    pub is_fallback: bool,
}

/// Positional record for one chapter after segmentation.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterRecord {
    pub chapter_index: usize,
    pub title: String,
    pub raw_title: String,
    pub heading: Option<String>,
    pub start_position: usize,
    pub end_position: usize,
    pub word_count: usize,
    pub character_count: usize,
    pub total_segments: usize,
    pub detection_method: DetectionMethod,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildStatistics {
    pub total_chapters: usize,
    pub total_segments: usize,
    pub total_words: usize,
    pub avg_words_per_segment: usize,
    pub segment_types: HashMap<SegmentType, usize>,
}

/// Chapters plus their segments with globally contiguous positions.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterBuild {
    pub chapters: Vec<ChapterRecord>,
    pub segments: Vec<Segment>,
    pub statistics: BuildStatistics,
}

fn fallback_title(index: usize) -> String {
    format!("第{}章", index + 1)
}

fn normalize_title(raw: &str, fallback_index: usize) -> String {
    let cleaned = RE_HEADING_PREFIX.replace(raw, "");
    let cleaned = RE_TITLE_LEADING.replace(&cleaned, "");
    let cleaned = RE_TITLE_TRAILING.replace(&cleaned, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        fallback_title(fallback_index)
    } else {
        cleaned.to_string()
    }
}

/// Slice content into chapters by heading lines.
///
/// Text before the first heading becomes a preface slice (`序章`); content
/// with no headings at all becomes a single fallback chapter.
pub fn split_into_chapters(content: &str) -> Vec<ChapterSlice> {
    let normalized = content.replace("\r\n", "\n");
    let matches: Vec<_> = RE_CHAPTER_HEADING.find_iter(&normalized).collect();
    let mut slices: Vec<ChapterSlice> = Vec::new();

    if matches.is_empty() {
        slices.push(ChapterSlice {
            index: 0,
            title: fallback_title(0),
            raw_title: fallback_title(0),
            heading: None,
            body: normalized.trim().to_string(),
            detection_method: DetectionMethod::Fallback,
            is_fallback: true,
        });
        return slices;
    }

    if matches[0].start() > 0 {
        let prefix = &normalized[..matches[0].start()];
        if !prefix.trim().is_empty() {
            slices.push(ChapterSlice {
                index: slices.len(),
                title: "序章".to_string(),
                raw_title: "序章".to_string(),
                heading: Some("序章".to_string()),
                body: prefix.trim().to_string(),
                detection_method: DetectionMethod::Preface,
                is_fallback: true,
            });
        }
    }

    for (i, m) in matches.iter().enumerate() {
        let heading_line = m.as_str().trim().to_string();
        let body_start = m.end();
        let body_end = matches.get(i + 1).map(|n| n.start()).unwrap_or(normalized.len());
        let body = normalized[body_start..body_end].trim().to_string();

        let index = slices.len();
        slices.push(ChapterSlice {
            index,
            title: normalize_title(&heading_line, index),
            raw_title: heading_line.clone(),
            heading: Some(heading_line),
            body,
            detection_method: DetectionMethod::Detected,
            is_fallback: false,
        });
    }

    debug!(chapters = slices.len(), "chapter slicing completed");
    slices
}

/// Segment every chapter and assign globally contiguous positions and
/// orders, the shape the persistence collaborator stores directly.
pub fn build_chapter_segments(content: &str, options: &ProcessingOptions) -> Result<ChapterBuild> {
    let slices = split_into_chapters(content);

    let mut chapters: Vec<ChapterRecord> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut segment_types: HashMap<SegmentType, usize> = HashMap::new();

    let mut global_index = 0usize;
    let mut global_position = 0usize;
    let mut total_words = 0usize;

    for slice in &slices {
        let chapter_start = global_position;
        let mut chapter_words = 0usize;
        let mut chapter_chars = 0usize;
        let mut chapter_order = 0usize;

        for piece in segment_content(&slice.body, options) {
            if piece.content.is_empty() {
                continue;
            }
            let character_count = piece.content.chars().count();
            let word_count = count_words(&piece.content);

            let mut metadata = piece.metadata.clone();
            metadata.extra = json!({
                "chapter_index": slice.index,
                "chapter_title": slice.title,
                "chapter_order_index": chapter_order,
            });

            segments.push(Segment {
                order: global_index,
                semantic_length: piece.semantic_length,
                segment_type: piece.segment_type,
                start_position: global_position,
                end_position: global_position + character_count,
                metadata,
                content: piece.content,
            });
            *segment_types.entry(piece.segment_type).or_insert(0) += 1;

            global_index += 1;
            chapter_order += 1;
            global_position += character_count;
            chapter_words += word_count;
            chapter_chars += character_count;
            total_words += word_count;
        }

        chapters.push(ChapterRecord {
            chapter_index: slice.index,
            title: slice.title.clone(),
            raw_title: slice.raw_title.clone(),
            heading: slice.heading.clone(),
            start_position: chapter_start,
            end_position: global_position,
            word_count: chapter_words,
            character_count: chapter_chars,
            total_segments: chapter_order,
            detection_method: slice.detection_method,
            is_fallback: slice.is_fallback,
        });
    }

    if segments.is_empty() {
        return Err(IcError::EmptyContent);
    }

    let total_segments = segments.len();
    Ok(ChapterBuild {
        chapters,
        segments,
        statistics: BuildStatistics {
            total_chapters: slices.len(),
            total_segments,
            total_words,
            avg_words_per_segment: if total_segments > 0 { total_words / total_segments } else { 0 },
            segment_types,
        },
    })
}
