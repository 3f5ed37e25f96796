//! Post-segmentation quality checks.

use ic_core::{effective_length, BreakReason, Segment, SegmenterConfig};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QualityStats {
    pub total_segments: usize,
    pub avg_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub segments_in_band: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub stats: QualityStats,
}

fn ends_on_punctuation(content: &str) -> bool {
    content
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '。' | '！' | '？' | '；' | '：' | '.' | '!' | '?' | ';' | ':'))
}

/// Validate a segment sequence against the configured band.
///
/// The final segment is exempt from both bounds; forced pieces are exempt
/// from the max check but reported as possible mid-sentence truncation
/// when they do not end on punctuation.
pub fn validate_segment_quality(segments: &[Segment], config: &SegmenterConfig) -> QualityReport {
    let mut issues = Vec::new();
    let mut total = 0usize;
    let mut in_band = 0usize;
    let mut min_seen = usize::MAX;
    let mut max_seen = 0usize;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == segments.len() - 1;
        let forced = segment.metadata.break_reason == Some(BreakReason::Forced);
        let length = effective_length(&segment.content);

        total += length;
        min_seen = min_seen.min(length);
        max_seen = max_seen.max(length);

        if !is_last && !forced && length > config.max_length {
            issues.push(format!(
                "segment {} exceeds max length: {} > {}",
                segment.order, length, config.max_length
            ));
        }
        if !is_last && length < config.min_length {
            issues.push(format!(
                "segment {} below min length: {} < {}",
                segment.order, length, config.min_length
            ));
        }
        if length.abs_diff(config.target_length) <= config.tolerance {
            in_band += 1;
        }
        if forced && !ends_on_punctuation(&segment.content) {
            issues.push(format!(
                "segment {} may be truncated mid-sentence",
                segment.order
            ));
        }
    }

    let stats = QualityStats {
        total_segments: segments.len(),
        avg_length: if segments.is_empty() { 0 } else { total / segments.len() },
        min_length: if segments.is_empty() { 0 } else { min_seen },
        max_length: max_seen,
        segments_in_band: in_band,
    };

    QualityReport { valid: issues.is_empty(), issues, stats }
}
