//! Conversion collaborators.
//!
//! # Data Flow
//! ```text
//! payload bytes + Settings
//!     → Converter::convert
//!     → RenderedDocument (bytes + declared encoding)
//!     → http::response (envelope, escaping)
//! ```
//!
//! The request front-end only depends on the two traits below; the crate
//! ships a doctype catalogue and a passthrough converter so the binary works
//! on its own.

pub mod doctype;
pub mod passthrough;

use thiserror::Error;

use crate::cgi::params::Settings;

pub use doctype::{Doctype, StaticDoctypes, DOCTYPES};
pub use passthrough::PassthroughConverter;

/// Resolves doctype keys supplied by callers to catalogue indices.
pub trait DoctypeTable {
    /// Index of the entry whose key equals `key` exactly.
    fn lookup(&self, key: &[u8]) -> Option<usize>;

    /// Entry at `index`.
    fn get(&self, index: usize) -> Option<&Doctype>;
}

/// Output of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedDocument {
    /// Converted document.
    pub body: Vec<u8>,
    /// Character encoding declared by the document, if any.
    pub encoding: Option<String>,
}

/// Conversion failure, reported to the caller as a 400 page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConversionError {
    pub message: String,
    /// 1-based input line where the problem was detected.
    pub line: Option<usize>,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Turns an uploaded document into its converted form.
///
/// `settings.doctype` is an index into `doctypes`, the same table the
/// parameters were resolved against.
pub trait Converter {
    fn convert(
        &self,
        payload: &[u8],
        settings: &Settings,
        doctypes: &dyn DoctypeTable,
    ) -> Result<RenderedDocument, ConversionError>;
}
