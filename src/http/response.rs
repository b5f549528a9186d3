//! Response assembly.
//!
//! # Responsibilities
//! - Map request outcomes to status codes (405, 400, 200)
//! - Wrap converted documents in the result page when HTML output is on
//! - Serialise the response in CGI form (header lines, blank line, body)
//!
//! # Design Decisions
//! - The whole response is built in memory before anything is written, so a
//!   late failure can never follow a success header
//! - Error bodies follow the HTML output flag; conversion errors always
//!   carry a body so the caller learns what went wrong

use std::io::{self, Write};

use hyper::StatusCode;

use crate::cgi::classify::RequestStatus;
use crate::cgi::context::RequestContext;
use crate::config::ResponseConfig;
use crate::convert::{ConversionError, RenderedDocument};
use crate::http::templates;

/// A fully buffered CGI response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    /// Write the response to `out` as a CGI program would.
    ///
    /// The `Status` line is omitted for 200, which the server assumes.
    pub fn write_cgi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Content-Type:{}", self.content_type)?;
        if self.status != StatusCode::OK {
            writeln!(
                out,
                "Status:{} {}",
                self.status.as_u16(),
                self.status.canonical_reason().unwrap_or("")
            )?;
        }
        writeln!(out)?;
        out.write_all(&self.body)?;
        out.flush()
    }

    /// Body as text, for logging and tests.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Builds responses from request outcomes.
#[derive(Debug, Clone, Copy)]
pub struct ResponseAssembler<'a> {
    config: &'a ResponseConfig,
}

impl<'a> ResponseAssembler<'a> {
    pub fn new(config: &'a ResponseConfig) -> Self {
        Self { config }
    }

    /// Response for a request rejected during classification or scanning.
    pub fn rejected(&self, ctx: &RequestContext) -> Response {
        let status = match ctx.status {
            RequestStatus::ErrorMethod => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = if ctx.settings.html_output {
            templates::error_page(ctx, self.config, &status_heading(status), &[]).into_bytes()
        } else {
            Vec::new()
        };

        Response {
            status,
            content_type: "text/html".to_string(),
            body,
        }
    }

    /// Response for a process that could not start serving the request.
    pub fn internal_error(&self, ctx: &RequestContext) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let details = ["The converter is not configured correctly. Please try again later.".to_string()];

        Response {
            status,
            content_type: "text/html".to_string(),
            body: templates::error_page(ctx, self.config, &status_heading(status), &details).into_bytes(),
        }
    }

    /// Response for a payload the converter could not handle.
    pub fn conversion_failed(&self, ctx: &RequestContext, err: &ConversionError) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let location = match err.line {
            Some(line) => format!(" at line {line}"),
            None => String::new(),
        };
        let details = [
            format!(
                "An error has been detected while parsing the input{location}. \
                 Please check that you have uploaded an HTML document."
            ),
            format!("Error: {}", err.message),
        ];

        Response {
            status,
            content_type: "text/html".to_string(),
            body: templates::error_page(ctx, self.config, &status_heading(status), &details).into_bytes(),
        }
    }

    /// Response carrying the converted document.
    pub fn converted(&self, ctx: &RequestContext, doc: &RenderedDocument) -> Response {
        let body = if ctx.settings.html_output {
            let mut body = templates::result_header(self.config, doc.encoding.as_deref()).into_bytes();
            templates::escape_bytes(&doc.body, &mut body);
            body.extend_from_slice(templates::result_footer(ctx, self.config).as_bytes());
            body
        } else {
            doc.body.clone()
        };

        Response {
            status: StatusCode::OK,
            content_type: format!("text/html; charset={}", self.config.charset),
            body,
        }
    }
}

fn status_heading(status: StatusCode) -> String {
    format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
}
