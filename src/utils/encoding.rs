//! Best-effort file decoding.
//!
//! Reading never fails on undecodable bytes:
//! - UTF-16 files with a BOM are decoded as UTF-16
//! - valid UTF-8 is returned verbatim (a UTF-8 BOM is kept)
//! - text that is mostly UTF-8 is decoded as UTF-8, with replacement
//!   characters for the invalid sequences
//! - anything else (no valid multi-byte UTF-8 at all, e.g. Latin-1) is
//!   decoded with the encoding guessed by chardetng

use crate::error::IngestError;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Read the whole file at `path` as text.
///
/// Only I/O failures are reported; decoding problems are absorbed.
pub fn read_text_lossy(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)
        .map_err(|source| IngestError::FileRead { path: path.to_path_buf(), source })?;
    Ok(decode_lossy(&bytes))
}

/// Decode `bytes` into a `String`, never failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        if encoding == UTF_16LE || encoding == UTF_16BE {
            let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return decoded.into_owned();
        }
    }

    // Fast path: most source files are UTF-8
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let encoding = if has_multibyte_utf8(bytes) { UTF_8 } else { detect_encoding(bytes) };
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(bytes);
    decoded.into_owned()
}

/// Whether the buffer contains at least one valid non-ASCII UTF-8 sequence.
fn has_multibyte_utf8(bytes: &[u8]) -> bool {
    bytes.utf8_chunks().any(|chunk| !chunk.valid().is_ascii())
}

/// Guess the encoding of a non-UTF-8 buffer from its leading bytes.
fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}
