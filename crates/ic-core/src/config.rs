use serde::{Deserialize, Serialize};

use crate::error::{IcError, Result};
use crate::types::TextEncoding;

/// Length band for the core splitter. All values are semantic lengths,
/// not raw character counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Hard ceiling on a non-forced segment.
    pub max_length: usize,
    /// Soft midpoint callers bias batch boundaries toward.
    pub target_length: usize,
    /// Floor below which a segment becomes a merge candidate.
    pub min_length: usize,
    /// Uniformity tolerance around `target_length`, used by quality checks.
    pub tolerance: usize,
    /// Prefer punctuation break points inside forced character splits.
    pub prefer_sentence_boundary: bool,
}

impl SegmenterConfig {
    /// The audiobook production profile: 500-character segments within
    /// a 400..600 band.
    pub fn audiobook_profile() -> Self {
        Self {
            max_length: 600,
            target_length: 500,
            min_length: 400,
            tolerance: 100,
            prefer_sentence_boundary: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_length > self.max_length {
            return Err(IcError::InvalidConfig(
                "target_length cannot be greater than max_length".into(),
            ));
        }
        if self.min_length > self.target_length {
            return Err(IcError::InvalidConfig(
                "min_length cannot be greater than target_length".into(),
            ));
        }
        if self.max_length == 0 {
            return Err(IcError::InvalidConfig("max_length must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_length: 1000,
            target_length: 800,
            min_length: 50,
            tolerance: 100,
            prefer_sentence_boundary: true,
        }
    }
}

/// Chunk window for the overlap-aware splitter. Overlap defaults to 5%
/// of the chunk size and is a content convenience only — it never enters
/// positional bookkeeping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverlapConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl OverlapConfig {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size, overlap: chunk_size / 20 }
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IcError::InvalidConfig("chunk_size must be positive".into()));
        }
        if self.overlap >= self.chunk_size {
            return Err(IcError::InvalidConfig(
                "overlap must be less than chunk_size".into(),
            ));
        }
        Ok(())
    }
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Options for one upload-processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// When true the cleaner only normalizes line endings; when false it
    /// also collapses whitespace runs and trims.
    pub preserve_formatting: bool,
    /// Selects the sentence-greedy splitter over the windowed one.
    pub use_smart_splitter: bool,
    /// Skips encoding detection entirely when set.
    pub forced_encoding: Option<TextEncoding>,
    pub segmenter: SegmenterConfig,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            preserve_formatting: true,
            use_smart_splitter: true,
            forced_encoding: None,
            segmenter: SegmenterConfig::default(),
        }
    }
}
