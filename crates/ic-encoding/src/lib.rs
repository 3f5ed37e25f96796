//! Upload decoding for inkcast: encoding detection, cleaning, format
//! detection. Runs before segmentation; pure computation over bytes.

pub mod clean;
pub mod detect;
pub mod format;

pub use clean::clean_text;
pub use detect::{decode_buffer, detect_bom, detect_encoding};
pub use format::detect_file_format;

use ic_core::{count_words, IcError, ProcessedText, ProcessingOptions, Result};
use tracing::info;

/// Turn a raw upload into cleaned, decoded text.
///
/// Detects (or takes the forced) encoding, decodes, detects format on the
/// raw decode, cleans, and errors with [`IcError::EmptyContent`] when
/// nothing survives cleaning — the "corrupted/empty file" category.
pub fn process_file_content(
    buffer: &[u8],
    filename: &str,
    options: &ProcessingOptions,
) -> Result<ProcessedText> {
    let encoding = options
        .forced_encoding
        .unwrap_or_else(|| detect_encoding(buffer));

    info!(filename, encoding = %encoding, buffer_size = buffer.len(), "processing file content");

    let decoded = decode_buffer(buffer, encoding);
    let detected_format = detect_file_format(filename, &decoded);
    let content = clean_text(&decoded, options.preserve_formatting);

    if content.trim().is_empty() {
        return Err(IcError::EmptyContent);
    }

    let character_count = content.chars().count();
    let word_count = count_words(&content);

    info!(
        encoding = %encoding,
        format = ?detected_format,
        character_count,
        word_count,
        "file content processed"
    );

    Ok(ProcessedText {
        content,
        word_count,
        character_count,
        encoding,
        detected_format,
    })
}
