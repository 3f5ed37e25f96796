//! Encoding detection — BOM short-circuit plus candidate scoring.

use encoding_rs::{Encoding, BIG5, GBK, UTF_16BE, UTF_16LE, UTF_8};
use ic_core::length::is_cjk_ideograph;
use ic_core::TextEncoding;
use tracing::{debug, info};

/// UTF-8 BOM: EF BB BF
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
/// UTF-16 LE BOM: FF FE
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
/// UTF-16 BE BOM: FE FF
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Candidates in priority order; ties keep the earlier entry.
/// The gb2312 label maps onto GBK in the WHATWG registry, so that
/// candidate can only win through priority, never on score.
fn candidates() -> [(TextEncoding, &'static Encoding); 5] {
    [
        (TextEncoding::Utf8, UTF_8),
        (TextEncoding::Gbk, GBK),
        (TextEncoding::Gb2312, GBK),
        (TextEncoding::Utf16Le, UTF_16LE),
        (TextEncoding::Big5, BIG5),
    ]
}

/// Common CJK punctuation, weighted heavily: its presence is a strong
/// signal the candidate decoded real Chinese text.
fn is_cjk_punct(c: char) -> bool {
    matches!(
        c,
        '，' | '。' | '！' | '？' | '；' | '：' | '“' | '”' | '‘' | '’' | '（' | '）'
            | '【' | '】' | '《' | '》' | '、'
    )
}

fn is_printable(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{7E}')
        || matches!(c,
            '\u{4E00}'..='\u{9FFF}' | '\u{3000}'..='\u{303F}' | '\u{FF00}'..='\u{FFEF}')
}

/// BOM signatures are authoritative: no scoring when one is present.
pub fn detect_bom(buffer: &[u8]) -> Option<TextEncoding> {
    if buffer.starts_with(UTF8_BOM) {
        return Some(TextEncoding::Utf8);
    }
    if buffer.starts_with(UTF16_LE_BOM) {
        return Some(TextEncoding::Utf16Le);
    }
    if buffer.starts_with(UTF16_BE_BOM) {
        return Some(TextEncoding::Utf16Be);
    }
    None
}

/// Score a candidate decode. Zero means disqualified.
fn score_decode(decoded: &str) -> f64 {
    if decoded.trim().is_empty() {
        return 0.0;
    }
    // Any replacement character disqualifies the candidate outright.
    if decoded.contains('\u{FFFD}') {
        return 0.0;
    }

    let total = decoded.chars().count() as f64;
    let mut cjk = 0usize;
    let mut latin = 0usize;
    let mut punct = 0usize;
    let mut unprintable = 0usize;

    for c in decoded.chars() {
        if is_cjk_ideograph(c) {
            cjk += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
        if is_cjk_punct(c) {
            punct += 1;
        }
        if !is_printable(c) && !is_cjk_ideograph(c) {
            unprintable += 1;
        }
    }

    let mut score = 10.0;
    score += cjk as f64 / total * 100.0;
    score += latin as f64 / total * 10.0;
    score += punct as f64 / total * 50.0;
    if unprintable as f64 > total * 0.1 {
        score -= 50.0;
    }
    score
}

/// Determine the source encoding of a raw upload buffer.
///
/// Never fails: when every candidate is disqualified the answer is utf8.
pub fn detect_encoding(buffer: &[u8]) -> TextEncoding {
    if let Some(encoding) = detect_bom(buffer) {
        debug!(encoding = %encoding, "detected BOM");
        return encoding;
    }

    let mut best = TextEncoding::Utf8;
    let mut best_score = 0.0f64;

    for (name, encoding) in candidates() {
        let (decoded, _) = encoding.decode_without_bom_handling(buffer);
        let score = score_decode(&decoded);
        debug!(encoding = %name, score, "encoding candidate scored");
        if score > best_score {
            best_score = score;
            best = name;
        }
    }

    info!(encoding = %best, score = best_score, "detected encoding");
    best
}

/// Decode a buffer under a known encoding. Lossy: undecodable sequences
/// become replacement characters rather than errors.
pub fn decode_buffer(buffer: &[u8], encoding: TextEncoding) -> String {
    let enc: &Encoding = match encoding {
        TextEncoding::Utf8 => UTF_8,
        TextEncoding::Utf16Le => UTF_16LE,
        TextEncoding::Utf16Be => UTF_16BE,
        TextEncoding::Gbk | TextEncoding::Gb2312 => GBK,
        TextEncoding::Big5 => BIG5,
    };
    let (decoded, _) = enc.decode_with_bom_removal(buffer);
    decoded.into_owned()
}
