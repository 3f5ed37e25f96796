//! File-format detection: markdown vs plain text.

use ic_core::SourceFormat;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Markdown signals, checked in order; any single match decides.
static MARKDOWN_SIGNALS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?m)^#{1,6}\s+",     // ATX heading
        r"\*\*.*?\*\*",        // bold
        r"\*.*?\*",            // italic
        r"\[.*?\]\(.*?\)",     // inline link
        r"(?m)^[-*+]\s+",      // unordered list
        r"(?m)^\d+\.\s+",      // ordered list
        r"(?s)```.*?```",      // fenced code block
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Detect whether content is markdown or plain text.
///
/// A `.md` extension is authoritative; otherwise content signals decide,
/// so markdown inside a `.txt` upload is still recognized.
pub fn detect_file_format(filename: &str, content: &str) -> SourceFormat {
    let is_md_ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false);
    if is_md_ext {
        return SourceFormat::Md;
    }

    if MARKDOWN_SIGNALS.iter().any(|re| re.is_match(content)) {
        return SourceFormat::Md;
    }

    SourceFormat::Txt
}
