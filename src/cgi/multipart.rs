//! Strict multipart/form-data scanner.
//!
//! # Grammar
//! ```text
//! "--" BOUNDARY CRLF
//! "Content-Disposition: form-data; name=\"" NAME "\"" CRLF
//! [ further header lines, each ending CRLF ]
//! CRLF
//! VALUE CRLF          (absent for the payload field)
//! ```
//! Fields repeat until the one named `html`, whose content runs to the end of
//! the body as far as the scanner is concerned.
//!
//! # Design Decisions
//! - Single forward pass over one cursor; nothing is ever re-read
//! - Literals are matched byte-for-byte, so header order and spelling are fixed
//! - The first malformed field aborts the scan; there is no resynchronisation
//! - Header end is found by looking for CRLFCRLF only, never for the boundary

use thiserror::Error;

use crate::cgi::classify::Boundary;
use crate::cgi::cursor::InputCursor;
use crate::cgi::params::{ParameterRegistry, Settings};

/// Header that must open every field, up to the opening quote of the name.
pub const DISPOSITION_PREFIX: &[u8] = b"Content-Disposition: form-data; name=\"";

/// Name of the field carrying the document.
pub const PAYLOAD_FIELD: &[u8] = b"html";

const CRLF: &[u8] = b"\r\n";
const BLANK_LINE: &[u8] = b"\r\n\r\n";

/// Which part of the grammar a malformed body violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanFailure {
    /// `"--" boundary CRLF` not found where a field should start.
    #[error("boundary delimiter expected")]
    Boundary,
    /// Field does not start with the Content-Disposition prefix.
    #[error("Content-Disposition header expected")]
    HeaderPrefix,
    /// Line or buffer ended before the name's closing quote.
    #[error("unterminated field name")]
    UnterminatedName,
    /// No CRLFCRLF after the field headers.
    #[error("missing blank line after field headers")]
    MissingBlankLine,
    /// Value is not followed by CRLF.
    #[error("unterminated field value")]
    UnterminatedValue,
}

/// Malformed multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed multipart body at byte {offset}: {kind}")]
pub struct MultipartError {
    pub kind: ScanFailure,
    /// Cursor offset of the step that failed.
    pub offset: usize,
}

/// One ordinary form field. Both slices borrow from the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

/// What a single scan step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// An ordinary field; the cursor is at the next delimiter.
    Field(Field<'a>),
    /// The payload field's headers were consumed; the cursor is at its first byte.
    Payload,
}

/// Scanner bound to one request's boundary.
#[derive(Debug, Clone)]
pub struct MultipartScanner {
    delimiter: Vec<u8>,
}

impl MultipartScanner {
    pub fn new(boundary: &Boundary) -> Self {
        Self {
            delimiter: boundary.delimiter_line(),
        }
    }

    /// Consume fields, applying each through `registry`, until the payload
    /// field is reached. Returns the number of ordinary fields consumed.
    ///
    /// On error, fields consumed before the failure have already been applied.
    pub fn scan(
        &self,
        cursor: &mut InputCursor<'_>,
        registry: &ParameterRegistry<'_>,
        settings: &mut Settings,
    ) -> Result<usize, MultipartError> {
        let mut fields = 0;
        loop {
            match self.next_field(cursor)? {
                Step::Field(field) => {
                    registry.apply(settings, field.name, field.value);
                    fields += 1;
                }
                Step::Payload => return Ok(fields),
            }
        }
    }

    /// Read one field starting at the cursor.
    pub fn next_field<'a>(&self, cursor: &mut InputCursor<'a>) -> Result<Step<'a>, MultipartError> {
        if !cursor.eat(&self.delimiter) {
            return Err(failure(ScanFailure::Boundary, cursor));
        }
        if !cursor.eat(DISPOSITION_PREFIX) {
            return Err(failure(ScanFailure::HeaderPrefix, cursor));
        }

        let rest = cursor.rest();
        let name = match rest.iter().position(|&b| b == b'\r' || b == b'"') {
            Some(end) if rest[end] == b'"' => &rest[..end],
            _ => return Err(failure(ScanFailure::UnterminatedName, cursor)),
        };
        cursor.advance(name.len() + 1);

        match find(cursor.rest(), BLANK_LINE) {
            Some(at) => {
                cursor.advance(at + BLANK_LINE.len());
            }
            None => return Err(failure(ScanFailure::MissingBlankLine, cursor)),
        }

        if name == PAYLOAD_FIELD {
            tracing::trace!(offset = cursor.offset(), "Payload field reached");
            return Ok(Step::Payload);
        }

        let rest = cursor.rest();
        let Some(len) = find(rest, CRLF) else {
            return Err(failure(ScanFailure::UnterminatedValue, cursor));
        };
        let value = &rest[..len];
        cursor.advance(len + CRLF.len());

        tracing::trace!(
            name = %String::from_utf8_lossy(name),
            value_len = value.len(),
            "Field scanned"
        );
        Ok(Step::Field(Field { name, value }))
    }
}

fn failure(kind: ScanFailure, cursor: &InputCursor<'_>) -> MultipartError {
    MultipartError {
        kind,
        offset: cursor.offset(),
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
