//! Minimal converter that forwards the document with light normalisation.
//!
//! Line endings become LF, tabs are expanded to the configured tab stops and
//! the selected doctype declaration replaces any declaration the document
//! carries. Markup is not rewritten and lines are not reflowed.

use crate::cgi::params::Settings;
use crate::convert::{ConversionError, Converter, DoctypeTable, RenderedDocument};

/// How far into the document to look for a declared encoding.
const ENCODING_SNIFF_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughConverter;

impl Converter for PassthroughConverter {
    fn convert(
        &self,
        payload: &[u8],
        settings: &Settings,
        doctypes: &dyn DoctypeTable,
    ) -> Result<RenderedDocument, ConversionError> {
        if payload.trim_ascii().is_empty() {
            return Err(ConversionError::new("the document is empty"));
        }
        if let Some(pos) = payload.iter().position(|&b| b == 0) {
            let line = payload[..pos].iter().filter(|&&b| b == b'\n').count() + 1;
            return Err(ConversionError::at_line("unexpected NUL byte", line));
        }

        let mut body = Vec::with_capacity(payload.len());
        let mut input = payload;

        if let Some(doctype) = settings.doctype.and_then(|i| doctypes.get(i)) {
            body.extend_from_slice(doctype.declaration().as_bytes());
            input = skip_doctype(input);
        }

        normalise(input, settings.tab_length, &mut body);

        Ok(RenderedDocument {
            encoding: sniff_encoding(payload),
            body,
        })
    }
}

/// Drop a leading `<!DOCTYPE ...>` and the line break after it.
fn skip_doctype(input: &[u8]) -> &[u8] {
    let trimmed = input.trim_ascii_start();
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|p| p.eq_ignore_ascii_case(b"<!doctype"));
    if !is_doctype {
        return input;
    }
    match trimmed.iter().position(|&b| b == b'>') {
        Some(end) => {
            let rest = &trimmed[end + 1..];
            rest.strip_prefix(b"\r\n")
                .or_else(|| rest.strip_prefix(b"\n"))
                .unwrap_or(rest)
        }
        None => input,
    }
}

/// Copy `input` to `out`, turning CRLF and lone CR into LF and expanding tabs.
fn normalise(input: &[u8], tab_length: u32, out: &mut Vec<u8>) {
    let tab = tab_length as usize;
    let mut column = 0usize;
    let mut iter = input.iter().copied().peekable();

    while let Some(b) = iter.next() {
        match b {
            b'\r' => {
                if iter.peek() == Some(&b'\n') {
                    iter.next();
                }
                out.push(b'\n');
                column = 0;
            }
            b'\n' => {
                out.push(b'\n');
                column = 0;
            }
            b'\t' if tab > 0 => {
                let spaces = tab - column % tab;
                out.extend(std::iter::repeat(b' ').take(spaces));
                column += spaces;
            }
            b'\t' => {}
            _ => {
                out.push(b);
                column += 1;
            }
        }
    }
}

/// Encoding named by an XML declaration or a `charset=` attribute near the top.
fn sniff_encoding(payload: &[u8]) -> Option<String> {
    let head = &payload[..payload.len().min(ENCODING_SNIFF_LEN)];
    let lower = head.to_ascii_lowercase();

    ["encoding=", "charset="].iter().find_map(|key| {
        let start = crate::cgi::multipart::find(&lower, key.as_bytes())? + key.len();
        let value: String = head[start..]
            .iter()
            .skip_while(|&&b| b == b'"' || b == b'\'')
            .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
            .map(|&b| char::from(b))
            .collect();
        (!value.is_empty()).then_some(value)
    })
}
