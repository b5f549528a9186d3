//! Errors raised while taking a request apart.

use thiserror::Error;

use crate::cgi::classify::RequestStatus;
use crate::cgi::multipart::MultipartError;

/// Request intake failure. Each one ends the request with an error page.
#[derive(Debug, Error)]
pub enum CgiError {
    /// Body does not follow the multipart grammar.
    #[error(transparent)]
    Params(#[from] MultipartError),

    /// Declared body length is over the configured limit.
    #[error("body of {declared} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { declared: u64, limit: usize },

    /// Reading the body failed.
    #[error("failed to read request body: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter processing was asked for a request that has no body shape.
    #[error("request has no parsable body (status {0})")]
    NotClassified(RequestStatus),
}

impl CgiError {
    /// Status the request ends in after this error.
    pub fn status(&self) -> RequestStatus {
        match self {
            CgiError::Params(_) => RequestStatus::ErrorParams,
            CgiError::BodyTooLarge { .. } | CgiError::Io(_) => RequestStatus::ErrorOther,
            CgiError::NotClassified(status) => *status,
        }
    }
}
