use serde::{Deserialize, Serialize};

/// Coarse structural classification of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Chapter,
    Scene,
    Dialogue,
    Paragraph,
}

/// Advisory classification of a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Novel,
    Article,
    Dialogue,
    General,
}

/// Detected source file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Txt,
    Md,
}

/// Source text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Gbk,
    Gb2312,
    Big5,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Utf16Be => "utf16be",
            Self::Gbk => "gbk",
            Self::Gb2312 => "gb2312",
            Self::Big5 => "big5",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a segment boundary fell where it did.
///
/// `Forced` is the only variant that marks a mid-sentence character split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakReason {
    SentenceBoundary,
    ParagraphBoundary,
    Forced,
    LongSentence,
    FinalSegment,
    MergedForBalance,
}

/// Free-form per-segment flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_reason: Option<BreakReason>,
    #[serde(default)]
    pub has_dialogue: bool,
    #[serde(default)]
    pub has_description: bool,
    #[serde(default)]
    pub merged: bool,
    /// Set when the segment stayed below the minimum length because the
    /// merge that would have fixed it was blocked by the maximum length.
    #[serde(default)]
    pub unmerged_short: bool,
    #[serde(default)]
    pub character_count: usize,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub extra: serde_json::Value,
}

impl Default for SegmentMeta {
    fn default() -> Self {
        Self {
            break_reason: None,
            has_dialogue: false,
            has_description: false,
            merged: false,
            unmerged_short: false,
            character_count: 0,
            extra: serde_json::Value::Null,
        }
    }
}

/// One unit of segmentation output.
///
/// `start_position` / `end_position` are char offsets into the cleaned
/// text; across the whole sequence they are monotonic and non-overlapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub order: usize,
    pub content: String,
    pub semantic_length: usize,
    pub segment_type: SegmentType,
    pub start_position: usize,
    pub end_position: usize,
    #[serde(default)]
    pub metadata: SegmentMeta,
}

/// A decoded, cleaned upload ready for segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedText {
    pub content: String,
    pub word_count: usize,
    pub character_count: usize,
    pub encoding: TextEncoding,
    pub detected_format: SourceFormat,
}
