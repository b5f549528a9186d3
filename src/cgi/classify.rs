//! Request classification.
//!
//! # Responsibilities
//! - Decide whether this process was invoked as a CGI program at all
//! - Reject anything that is not a POST with a positive body length
//! - Pick the body interpretation (multipart form or raw HTML)
//! - Capture the multipart boundary
//!
//! # Design Decisions
//! - Only transport metadata is inspected, never the body
//! - The content-type prefixes are matched exactly (case-sensitive)

use std::fmt;

use crate::cgi::context::RequestContext;
use crate::cgi::env::CgiEnv;

/// Content-type prefix announcing a multipart body. Everything after it is the boundary.
pub const MULTIPART_PREFIX: &str = "multipart/form-data; boundary=";

/// Content-type prefix announcing a raw HTML body.
pub const DIRECT_PREFIX: &str = "text/html";

/// How the current request is to be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Not classified yet.
    #[default]
    Uninitialized,
    /// Body is the document itself.
    Direct,
    /// Body is a multipart form carrying parameters and the document.
    Multipart,
    /// Method other than POST.
    ErrorMethod,
    /// Missing length or unsupported content type.
    ErrorOther,
    /// Not a CGI invocation.
    ErrorNoCgi,
    /// Malformed multipart body.
    ErrorParams,
}

impl RequestStatus {
    /// Returns true for the states that end in an error response.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RequestStatus::ErrorMethod | RequestStatus::ErrorOther | RequestStatus::ErrorParams
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStatus::Uninitialized => "uninitialized",
            RequestStatus::Direct => "direct",
            RequestStatus::Multipart => "multipart",
            RequestStatus::ErrorMethod => "error-method",
            RequestStatus::ErrorOther => "error-other",
            RequestStatus::ErrorNoCgi => "no-cgi",
            RequestStatus::ErrorParams => "error-params",
        };
        f.write_str(name)
    }
}

/// Multipart delimiter declared in the content type.
///
/// Copied out of the header once, then only compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(Vec<u8>);

impl Boundary {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `"--" boundary CRLF`, the line that opens every field.
    pub fn delimiter_line(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(self.0.len() + 4);
        line.extend_from_slice(b"--");
        line.extend_from_slice(&self.0);
        line.extend_from_slice(b"\r\n");
        line
    }

    /// `CRLF "--" boundary`, the sequence that closes a field's content.
    pub fn closing_sequence(&self) -> Vec<u8> {
        let mut seq = Vec::with_capacity(self.0.len() + 4);
        seq.extend_from_slice(b"\r\n--");
        seq.extend_from_slice(&self.0);
        seq
    }
}

/// Classify the request and record the outcome on `ctx`.
pub fn classify(env: &CgiEnv, ctx: &mut RequestContext) -> RequestStatus {
    let (Some(content_type), Some(method), Some(_query)) = (
        env.content_type.as_deref(),
        env.method.as_deref(),
        env.query_string.as_deref(),
    ) else {
        ctx.status = RequestStatus::ErrorNoCgi;
        return ctx.status;
    };

    let length = env.declared_length();
    ctx.declared_length = length;

    ctx.status = if !method.eq_ignore_ascii_case("POST") {
        RequestStatus::ErrorMethod
    } else if length <= 0 {
        RequestStatus::ErrorOther
    } else if let Some(boundary) = content_type.strip_prefix(MULTIPART_PREFIX) {
        ctx.boundary = Some(Boundary::new(boundary.as_bytes()));
        RequestStatus::Multipart
    } else if content_type.starts_with(DIRECT_PREFIX) {
        RequestStatus::Direct
    } else {
        RequestStatus::ErrorOther
    };

    tracing::debug!(
        status = %ctx.status,
        method,
        content_type,
        length,
        "Request classified"
    );

    ctx.status
}
