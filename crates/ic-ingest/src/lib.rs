//! End-to-end ingest for audiobook source texts: decode, clean, slice
//! into chapters, segment, and validate — everything between an uploaded
//! buffer and the rows the persistence layer stores.

pub mod chapters;
pub mod pipeline;
pub mod quality;

pub use chapters::{
    build_chapter_segments, split_into_chapters, BuildStatistics, ChapterBuild, ChapterRecord,
    ChapterSlice, DetectionMethod,
};
pub use pipeline::{segment_content, IngestPipeline, IngestResult, IngestStatistics};
pub use quality::{validate_segment_quality, QualityReport, QualityStats};
