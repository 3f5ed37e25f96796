//! The ingest pipeline: raw upload bytes to ordered segments.

use std::collections::HashMap;

use ic_core::{
    count_words, semantic_length, ContentKind, OverlapConfig, ProcessedText, ProcessingOptions,
    Result, Segment, SegmentMeta, SegmentType,
};
use ic_encoding::process_file_content;
use ic_segmenter::{
    detect_content_type, detect_segment_type, has_description, has_dialogue, segment_text,
    smart_split_text,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::quality::validate_segment_quality;

/// Aggregate numbers for one processing run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestStatistics {
    pub total_segments: usize,
    pub total_words: usize,
    pub avg_semantic_length: usize,
    pub segment_types: HashMap<SegmentType, usize>,
    pub content_kind: ContentKind,
}

/// Everything a processing run produces.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResult {
    pub processed: ProcessedText,
    pub segments: Vec<Segment>,
    pub statistics: IngestStatistics,
}

/// Orchestrates decode → clean → segment for one document at a time.
/// Pure computation; safe to run concurrently across documents.
#[derive(Debug)]
pub struct IngestPipeline {
    options: ProcessingOptions,
}

impl IngestPipeline {
    pub fn new(options: ProcessingOptions) -> Result<Self> {
        options.segmenter.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Process a raw upload end to end.
    pub fn process(&self, buffer: &[u8], filename: &str) -> Result<IngestResult> {
        let processed = process_file_content(buffer, filename, &self.options)?;
        let segments = segment_content(&processed.content, &self.options);
        let content_kind = detect_content_type(&processed.content);

        if self.options.use_smart_splitter {
            let report = validate_segment_quality(&segments, &self.options.segmenter);
            if !report.valid {
                warn!(issues = report.issues.len(), "segment quality issues detected");
            }
        }

        let statistics = compute_statistics(&segments, content_kind);
        let method = if self.options.use_smart_splitter { "smart" } else { "windowed" };
        info!(
            filename,
            total_segments = statistics.total_segments,
            avg_semantic_length = statistics.avg_semantic_length,
            method,
            "text segmentation completed"
        );

        Ok(IngestResult { processed, segments, statistics })
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self { options: ProcessingOptions::default() }
    }
}

/// Segment already-cleaned text with the configured strategy.
pub fn segment_content(content: &str, options: &ProcessingOptions) -> Vec<Segment> {
    if options.use_smart_splitter {
        segment_text(content, &options.segmenter)
    } else {
        let kind = detect_content_type(content);
        segment_windowed(content, kind, options)
    }
}

/// The windowed path: separator-cascade chunks with a 5% overlap, then a
/// short-chunk merge filter. Chunk offsets are lost once overlap text is
/// carried across, so positions are cumulative content lengths.
fn segment_windowed(content: &str, kind: ContentKind, options: &ProcessingOptions) -> Vec<Segment> {
    let config = &options.segmenter;
    let window = OverlapConfig::new(config.max_length);
    let chunks = smart_split_text(content, kind, &window);

    // Merge allowance: up to 20% over max, the price of not emitting a
    // fragment shorter than min.
    let merge_ceiling = config.max_length * 12 / 10;

    let mut pieces: Vec<(String, bool)> = Vec::new();
    for chunk in chunks {
        let length = semantic_length(&chunk);
        if length >= config.min_length {
            pieces.push((chunk, false));
            continue;
        }
        match pieces.last_mut() {
            Some(last) => {
                let merged = format!("{}\n\n{}", last.0, chunk);
                if semantic_length(&merged) <= merge_ceiling {
                    last.0 = merged;
                    last.1 = true;
                } else {
                    pieces.push((chunk, false));
                }
            }
            // A leading short chunk is kept as-is.
            None => pieces.push((chunk, false)),
        }
    }

    let mut segments = Vec::with_capacity(pieces.len());
    let mut position = 0usize;
    for (order, (content, merged)) in pieces.into_iter().enumerate() {
        let character_count = content.chars().count();
        let start_position = position;
        position += character_count;
        segments.push(Segment {
            order,
            semantic_length: semantic_length(&content),
            segment_type: detect_segment_type(&content),
            start_position,
            end_position: position,
            metadata: SegmentMeta {
                has_dialogue: has_dialogue(&content),
                has_description: has_description(&content),
                merged,
                character_count,
                ..SegmentMeta::default()
            },
            content,
        });
    }
    segments
}

pub(crate) fn compute_statistics(segments: &[Segment], content_kind: ContentKind) -> IngestStatistics {
    let total_segments = segments.len();
    let total_words: usize = segments.iter().map(|s| count_words(&s.content)).sum();
    let total_semantic: usize = segments.iter().map(|s| s.semantic_length).sum();
    let mut segment_types: HashMap<SegmentType, usize> = HashMap::new();
    for seg in segments {
        *segment_types.entry(seg.segment_type).or_insert(0) += 1;
    }
    IngestStatistics {
        total_segments,
        total_words,
        avg_semantic_length: if total_segments > 0 { total_semantic / total_segments } else { 0 },
        segment_types,
        content_kind,
    }
}
