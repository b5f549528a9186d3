//! One request, start to finish.
//!
//! # Data Flow
//! ```text
//! CgiEnv
//!     → classify (status, boundary)
//!     → read body (CONTENT_LENGTH bytes)
//!     → process parameters (multipart scan or query string)
//!     → Converter::convert (payload)
//!     → ResponseAssembler (buffered Response)
//! ```

use std::io::Read;

use uuid::Uuid;

use crate::cgi::classify::{classify, RequestStatus};
use crate::cgi::context::RequestContext;
use crate::cgi::cursor::InputCursor;
use crate::cgi::env::CgiEnv;
use crate::cgi::error::CgiError;
use crate::cgi::multipart::MultipartScanner;
use crate::cgi::params::{ParameterRegistry, Settings};
use crate::cgi::payload::payload_extent;
use crate::cgi::query::apply_query_string;
use crate::config::{GatewayConfig, ResponseConfig};
use crate::convert::{Converter, DoctypeTable};
use crate::http::response::{Response, ResponseAssembler};

/// What the process should do after handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Write this response to stdout.
    Respond(Response),
    /// Not a CGI invocation; fall back to command-line behaviour.
    NotCgi,
}

/// Request handler wired to its collaborators.
pub struct Gateway<'a> {
    config: &'a GatewayConfig,
    doctypes: &'a dyn DoctypeTable,
    converter: &'a dyn Converter,
}

impl<'a> Gateway<'a> {
    pub fn new(config: &'a GatewayConfig, doctypes: &'a dyn DoctypeTable, converter: &'a dyn Converter) -> Self {
        Self {
            config,
            doctypes,
            converter,
        }
    }

    /// Handle the request described by `env`, reading its body from `body`.
    pub fn handle<R: Read>(&self, env: &CgiEnv, body: R) -> Outcome {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", %request_id);
        let _enter = span.enter();

        let assembler = ResponseAssembler::new(&self.config.response);
        let mut ctx = RequestContext::new(Settings::from_defaults(&self.config.defaults, self.doctypes));

        match classify(env, &mut ctx) {
            RequestStatus::ErrorNoCgi => {
                tracing::debug!("CGI signals absent");
                return Outcome::NotCgi;
            }
            status if status.is_error() => {
                tracing::warn!(%status, "Request rejected");
                return Outcome::Respond(assembler.rejected(&ctx));
            }
            _ => {}
        }

        let body = match read_body(body, ctx.declared_length, self.config.request.max_body_size) {
            Ok(body) => body,
            Err(e) => {
                ctx.status = e.status();
                tracing::warn!(error = %e, "Request body rejected");
                return Outcome::Respond(assembler.rejected(&ctx));
            }
        };

        let query = env.query_string.as_deref().unwrap_or_default();
        let payload = match self.process_parameters(&mut ctx, &body, query) {
            Ok(payload) => payload,
            Err(e) => {
                ctx.status = e.status();
                tracing::warn!(error = %e, "Parameter processing failed");
                return Outcome::Respond(assembler.rejected(&ctx));
            }
        };

        match self.converter.convert(payload, &ctx.settings, self.doctypes) {
            Ok(doc) => {
                tracing::info!(
                    status = %ctx.status,
                    payload_len = payload.len(),
                    output_len = doc.body.len(),
                    html_output = ctx.settings.html_output,
                    "Document converted"
                );
                Outcome::Respond(assembler.converted(&ctx, &doc))
            }
            Err(e) => {
                tracing::warn!(error = %e, line = ?e.line, "Conversion failed");
                Outcome::Respond(assembler.conversion_failed(&ctx, &e))
            }
        }
    }

    /// Apply caller parameters to `ctx.settings` and return the payload.
    ///
    /// Multipart bodies are scanned up to the `html` field; direct bodies take
    /// their parameters from the query string and are the payload as a whole.
    pub fn process_parameters<'b>(
        &self,
        ctx: &mut RequestContext,
        body: &'b [u8],
        query: &str,
    ) -> Result<&'b [u8], CgiError> {
        let registry = ParameterRegistry::new(self.doctypes);

        match (ctx.status, ctx.boundary.as_ref()) {
            (RequestStatus::Direct, _) => {
                ctx.settings.html_output = false;
                let applied = apply_query_string(query, &registry, &mut ctx.settings);
                tracing::debug!(applied, "Query string parameters processed");
                Ok(body)
            }
            (RequestStatus::Multipart, Some(boundary)) => {
                let mut cursor = InputCursor::new(body);
                let fields = MultipartScanner::new(boundary).scan(&mut cursor, &registry, &mut ctx.settings)?;
                let payload = payload_extent(cursor.rest(), boundary, self.config.request.trim_trailing_boundary);
                tracing::debug!(
                    fields,
                    payload_offset = cursor.offset(),
                    payload_len = payload.len(),
                    "Multipart parameters processed"
                );
                Ok(payload)
            }
            (status, _) => Err(CgiError::NotClassified(status)),
        }
    }
}

/// Outcome for a process whose configuration or logging failed to start.
///
/// Under CGI the web server still gets a complete 500 response; otherwise the
/// caller reports the error on the command line.
pub fn startup_failed(env: &CgiEnv) -> Outcome {
    if !env.is_cgi() {
        return Outcome::NotCgi;
    }
    let config = ResponseConfig::default();
    let mut ctx = RequestContext::default();
    ctx.status = RequestStatus::ErrorOther;
    Outcome::Respond(ResponseAssembler::new(&config).internal_error(&ctx))
}

/// Read the declared number of body bytes.
///
/// A body shorter than declared is accepted as it is.
pub fn read_body<R: Read>(reader: R, declared: i64, limit: usize) -> Result<Vec<u8>, CgiError> {
    let declared = u64::try_from(declared).unwrap_or(0);
    if usize::try_from(declared).map_or(true, |d| d > limit) {
        return Err(CgiError::BodyTooLarge { declared, limit });
    }

    let mut body = Vec::with_capacity(declared as usize);
    reader.take(declared).read_to_end(&mut body)?;

    if (body.len() as u64) < declared {
        tracing::warn!(declared, received = body.len(), "Request body shorter than declared");
    }
    Ok(body)
}
