//! Per-request state threaded through classification, scanning and conversion.

use crate::cgi::classify::{Boundary, RequestStatus};
use crate::cgi::params::Settings;

/// Everything one request accumulates before the response is assembled.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Classification outcome.
    pub status: RequestStatus,
    /// Multipart boundary, present only for multipart requests.
    pub boundary: Option<Boundary>,
    /// `CONTENT_LENGTH` as declared, -1 when unknown.
    pub declared_length: i64,
    /// Conversion options, mutated by the parameter registry.
    pub settings: Settings,
}

impl RequestContext {
    /// Start a request with pre-seeded settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            status: RequestStatus::Uninitialized,
            boundary: None,
            declared_length: -1,
            settings,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
