//! Separator-cascade splitter with overlap windows.
//!
//! Splits on the coarsest separator present, recursing into finer ones for
//! oversized pieces, then packs pieces into chunks carrying a short tail
//! overlap into the next chunk. The overlap preserves cross-boundary
//! context for downstream LLM consumption; it is content-only and never
//! enters positional bookkeeping.

use ic_core::{ContentKind, OverlapConfig};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Separators in priority order; the empty string is the char-level
/// fallback and must come last.
fn separators_for(kind: ContentKind) -> Vec<&'static str> {
    match kind {
        // Novels: chapter/paragraph gaps first, then dialogue-closing
        // punctuation so quoted speech breaks after the closing quote.
        ContentKind::Novel => vec![
            "\n\n\n", "\n\n", "。”", "！”", "？”", "。", "！", "？", "\n", "；", "，", " ", "",
        ],
        // Dialogue: keep quoted runs whole as long as possible.
        ContentKind::Dialogue => vec![
            "\n\n", "。”", "！”", "？”", "”", "\n", "。", "！", "？", "，", " ", "",
        ],
        ContentKind::Article => vec![
            "\n\n", "\n", "。", "！", "？", ".", "!", "?", "；", ";", "，", ",", " ", "",
        ],
        ContentKind::General => vec![
            "\n\n\n", "\n\n", "\n", "。", "！", "？", "；", ".", "!", "?", ";", "，", ",", " ", "",
        ],
    }
}

/// Recursive character splitter with a configurable separator cascade.
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<&'static str>,
}

impl RecursiveSplitter {
    pub fn new(config: OverlapConfig, kind: ContentKind) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.overlap,
            separators: separators_for(kind),
        }
    }

    pub fn with_separators(mut self, separators: Vec<&'static str>) -> Self {
        self.separators = separators;
        self
    }

    /// Split text into chunks of at most `chunk_size` chars (soft — a
    /// piece with no finer separator left passes through oversized).
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let chunks = self.split_recursive(text, &self.separators);
        debug!(
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.chunk_overlap,
            "recursive split completed"
        );
        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[&'static str]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // Coarsest separator actually present in the text.
        let mut separator = *separators.last().unwrap_or(&"");
        let mut remaining: &[&'static str] = &[];
        for (i, s) in separators.iter().enumerate() {
            if s.is_empty() || text.contains(s) {
                separator = s;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let splits = self.split_keeping_separator(text, separator);

        let mut good_splits: Vec<String> = Vec::new();
        for piece in splits {
            if piece.chars().count() < self.chunk_size {
                good_splits.push(piece);
            } else {
                if !good_splits.is_empty() {
                    final_chunks.extend(self.merge_splits(&good_splits));
                    good_splits.clear();
                }
                if remaining.is_empty() {
                    final_chunks.push(piece);
                } else {
                    final_chunks.extend(self.split_recursive(&piece, remaining));
                }
            }
        }
        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits));
        }

        final_chunks
    }

    fn split_keeping_separator(&self, text: &str, separator: &str) -> Vec<String> {
        if separator.is_empty() {
            return text.chars().map(String::from).collect();
        }

        let parts: Vec<&str> = text.split(separator).collect();
        let mut splits = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            if i < parts.len() - 1 {
                splits.push(format!("{part}{separator}"));
            } else if !part.is_empty() {
                splits.push((*part).to_string());
            }
        }
        splits.into_iter().filter(|s| !s.is_empty()).collect()
    }

    /// Pack small pieces into chunks, keeping a tail overlap between
    /// consecutive chunks.
    fn merge_splits(&self, splits: &[String]) -> Vec<String> {
        let mut docs: Vec<String> = Vec::new();
        let mut window: VecDeque<&String> = VecDeque::new();
        let mut total = 0usize;

        for piece in splits {
            let piece_len = piece.chars().count();
            if total + piece_len > self.chunk_size && !window.is_empty() {
                if total > self.chunk_size {
                    warn!(chunk_size = self.chunk_size, actual = total, "oversized chunk");
                }
                if let Some(doc) = join_window(&window) {
                    docs.push(doc);
                }
                // Shrink until the carried tail fits the overlap budget and
                // leaves room for the incoming piece.
                while total > self.chunk_overlap
                    || (total + piece_len > self.chunk_size && total > 0)
                {
                    let Some(first) = window.pop_front() else { break };
                    total = total.saturating_sub(first.chars().count());
                }
            }
            window.push_back(piece);
            total += piece_len;
        }

        if let Some(doc) = join_window(&window) {
            docs.push(doc);
        }
        docs
    }
}

fn join_window(window: &VecDeque<&String>) -> Option<String> {
    let joined: String = window.iter().map(|s| s.as_str()).collect();
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split with the separator cascade matched to the detected content kind.
pub fn smart_split_text(text: &str, kind: ContentKind, config: &OverlapConfig) -> Vec<String> {
    RecursiveSplitter::new(*config, kind).split_text(text)
}
