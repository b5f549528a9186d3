//! Extent of the document payload inside a multipart body.
//!
//! The scanner stops at the first payload byte and does not look further.
//! When trimming is enabled, the payload is cut at the closing
//! `CRLF "--" boundary`, followed by `--` or CRLF, so the converter never
//! sees the multipart trailer.

use crate::cgi::classify::Boundary;
use crate::cgi::multipart::find;

/// Slice of `rest` that holds the document.
///
/// `rest` must start at the first payload byte. Without a closing delimiter
/// (or with `trim` off) the whole remainder is returned.
pub fn payload_extent<'a>(rest: &'a [u8], boundary: &Boundary, trim: bool) -> &'a [u8] {
    if !trim {
        return rest;
    }
    match closing_delimiter(rest, &boundary.closing_sequence()) {
        Some(end) => &rest[..end],
        None => {
            tracing::debug!(len = rest.len(), "No closing boundary after payload");
            rest
        }
    }
}

/// Offset of the first `closing` sequence followed by `--` or CRLF.
///
/// A match with any other suffix is document text that happens to start
/// with the boundary, and the search continues past it.
fn closing_delimiter(rest: &[u8], closing: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = find(&rest[from..], closing) {
        let start = from + pos;
        let suffix = &rest[start + closing.len()..];
        if suffix.starts_with(b"--") || suffix.starts_with(b"\r\n") {
            return Some(start);
        }
        from = start + 1;
    }
    None
}
