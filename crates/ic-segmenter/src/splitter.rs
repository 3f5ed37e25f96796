//! The core splitter: paragraph split, sentence split, greedy reassembly
//! within a semantic-length band, forced character splits as a last resort.

use ic_core::{
    effective_length, semantic_length, BreakReason, Segment, SegmentMeta, SegmenterConfig,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::repair::repair_drafts;
use crate::segment_type::{detect_segment_type, has_description, has_dialogue};
use crate::sentence::split_sentences;

static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Punctuation eligible as a break point inside a forced split.
fn is_break_punct(c: char) -> bool {
    matches!(c, '，' | '。' | '！' | '？' | '；' | '：' | ',' | '.' | '!' | '?' | ';' | ':')
}

/// Intermediate segment: trimmed content plus its char span in the input.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub content: String,
    pub start: usize,
    pub end: usize,
    pub reason: BreakReason,
    pub merged: bool,
    pub unmerged_short: bool,
}

impl Draft {
    fn new(content: &str, start: usize, end: usize, reason: BreakReason) -> Self {
        Self {
            content: content.trim().to_string(),
            start,
            end,
            reason,
            merged: false,
            unmerged_short: false,
        }
    }
}

/// One sentence with precomputed lengths; offsets are global char offsets.
struct SentenceUnit {
    start: usize,
    end: usize,
    semantic: usize,
    effective: usize,
}

/// Split cleaned text into ordered segments within the configured band.
///
/// Sentence integrity is violated only when a single sentence alone
/// exceeds `max_length`; those pieces carry [`BreakReason::Forced`].
/// Empty input yields an empty list, never an error.
pub fn segment_text(content: &str, config: &SegmenterConfig) -> Vec<Segment> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let total_chars = content.chars().count();
    if effective_length(content) <= config.max_length {
        let draft = Draft::new(content, 0, total_chars, BreakReason::ParagraphBoundary);
        return finalize(vec![draft]);
    }

    // Char-index to byte-index table; positions are char offsets throughout.
    let byte_at: Vec<usize> = content
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(content.len()))
        .collect();
    let to_char = |byte: usize| byte_at.partition_point(|&b| b < byte);
    let slice_of = |s: usize, e: usize| &content[byte_at[s]..byte_at[e]];

    let sentences = collect_sentences(content, &byte_at, to_char);
    debug!(sentences = sentences.len(), total_chars, "greedy reassembly");

    let mut drafts: Vec<Draft> = Vec::new();
    // (span start, span end, accumulated semantic length)
    let mut current: Option<(usize, usize, usize)> = None;

    for unit in &sentences {
        if let Some((cs, ce, sem)) = current {
            let candidate_sem = sem + unit.semantic;
            let candidate_chars = unit.end - cs;
            if candidate_sem.max(candidate_chars) <= config.max_length {
                current = Some((cs, unit.end, candidate_sem));
                continue;
            }
            drafts.push(Draft::new(slice_of(cs, ce), cs, ce, BreakReason::SentenceBoundary));
            current = None;
        }

        if unit.effective > config.max_length {
            // The one place sentence integrity is sacrificed.
            force_split_sentence(content, &byte_at, unit.start, unit.end, config, &mut drafts);
        } else {
            current = Some((unit.start, unit.end, unit.semantic));
        }
    }

    if let Some((cs, ce, _)) = current {
        drafts.push(Draft::new(slice_of(cs, ce), cs, ce, BreakReason::FinalSegment));
    }

    let drafts = repair_drafts(drafts, config);
    finalize(drafts)
}

fn collect_sentences(
    content: &str,
    byte_at: &[usize],
    to_char: impl Fn(usize) -> usize,
) -> Vec<SentenceUnit> {
    let mut paragraph_spans: Vec<(usize, usize)> = Vec::new();
    let mut last_byte = 0usize;
    for m in RE_PARAGRAPH_BREAK.find_iter(content) {
        if m.start() > last_byte {
            paragraph_spans.push((to_char(last_byte), to_char(m.start())));
        }
        last_byte = m.end();
    }
    if last_byte < content.len() {
        paragraph_spans.push((to_char(last_byte), to_char(content.len())));
    }

    let mut sentences = Vec::new();
    for (ps, pe) in paragraph_spans {
        let slice = &content[byte_at[ps]..byte_at[pe]];
        if slice.trim().is_empty() {
            continue;
        }
        for s in split_sentences(slice) {
            sentences.push(SentenceUnit {
                start: ps + s.start,
                end: ps + s.end,
                semantic: semantic_length(&s.text),
                effective: effective_length(&s.text),
            });
        }
    }
    sentences
}

/// Character-level split of a single oversized sentence into pieces no
/// longer than `max_length` chars, preferring a punctuation break point
/// inside the window (never below `min_length` into it).
fn force_split_sentence(
    content: &str,
    byte_at: &[usize],
    start: usize,
    end: usize,
    config: &SegmenterConfig,
    out: &mut Vec<Draft>,
) {
    let chars: Vec<char> = content[byte_at[start]..byte_at[end]].chars().collect();
    let len = chars.len();
    let mut cursor = 0usize;

    while cursor < len {
        let mut piece_end = (cursor + config.max_length).min(len);

        if config.prefer_sentence_boundary && piece_end < len {
            let floor = cursor + config.min_length;
            let mut i = piece_end;
            while i > floor {
                if i < len && is_break_punct(chars[i]) {
                    piece_end = i + 1;
                    break;
                }
                i -= 1;
            }
        }

        let piece: String = chars[cursor..piece_end].iter().collect();
        out.push(Draft::new(&piece, start + cursor, start + piece_end, BreakReason::Forced));
        cursor = piece_end;
    }
}

fn finalize(drafts: Vec<Draft>) -> Vec<Segment> {
    drafts
        .into_iter()
        .filter(|d| !d.content.is_empty())
        .enumerate()
        .map(|(order, d)| Segment {
            order,
            semantic_length: semantic_length(&d.content),
            segment_type: detect_segment_type(&d.content),
            start_position: d.start,
            end_position: d.end,
            metadata: SegmentMeta {
                break_reason: Some(d.reason),
                has_dialogue: has_dialogue(&d.content),
                has_description: has_description(&d.content),
                merged: d.merged,
                unmerged_short: d.unmerged_short,
                character_count: d.content.chars().count(),
                ..SegmentMeta::default()
            },
            content: d.content,
        })
        .collect()
}
