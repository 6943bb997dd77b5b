//! Upstream body normalization.
//!
//! The rendering service replies gzip-compressed when asked to (and it is
//! asked to whenever a token is configured). The relay always hands text to
//! the hooks and the client, so gzip framing is undone here, before anything
//! downstream sees the body.

use std::io::Read;

use axum::http::header::{CONTENT_ENCODING, CONTENT_LENGTH};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;

use crate::error::RelayError;

/// Decode `raw` into text according to the response headers.
///
/// A `content-encoding: gzip` body is decompressed in full and the
/// `content-encoding` and `content-length` entries are dropped from
/// `headers`, since neither describes the decoded body any more. Any other
/// encoding value passes through untouched; the relay only ever advertises
/// gzip upstream. Non-UTF-8 bytes are replaced rather than rejected.
pub fn decode_body(headers: &mut HeaderMap, raw: &[u8]) -> Result<String, RelayError> {
    let gzipped = headers
        .get(CONTENT_ENCODING)
        .map(|value| value.as_bytes() == b"gzip")
        .unwrap_or(false);

    if !gzipped {
        return Ok(String::from_utf8_lossy(raw).into_owned());
    }

    let mut decoder = GzDecoder::new(raw);
    let mut decoded = Vec::new();
    decoder
        .read_to_end(&mut decoded)
        .map_err(RelayError::Decode)?;

    headers.remove(CONTENT_ENCODING);
    headers.remove(CONTENT_LENGTH);

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}
