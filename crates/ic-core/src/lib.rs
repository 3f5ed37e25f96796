pub mod config;
pub mod error;
pub mod length;
pub mod types;

pub use config::{OverlapConfig, ProcessingOptions, SegmenterConfig};
pub use error::{IcError, Result};
pub use length::{count_words, effective_length, semantic_length};
pub use types::{
    BreakReason, ContentKind, ProcessedText, Segment, SegmentMeta, SegmentType, SourceFormat,
    TextEncoding,
};

#[cfg(test)]
mod tests;
