//! CGI transport signals.
//!
//! The web server passes request metadata to the process through
//! environment variables. This module only reads them; interpreting them is
//! the classifier's job.

use std::env;

use crate::cgi::params::parse_int;

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const QUERY_STRING: &str = "QUERY_STRING";

/// Request metadata as seen by a CGI program.
///
/// A `None` field means the variable was not set at all, which is different
/// from being set to the empty string (an empty `QUERY_STRING` is normal).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgiEnv {
    pub method: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub query_string: Option<String>,
}

impl CgiEnv {
    /// Read the signals from the process environment.
    pub fn from_process() -> Self {
        Self {
            method: var(REQUEST_METHOD),
            content_type: var(CONTENT_TYPE),
            content_length: var(CONTENT_LENGTH),
            query_string: var(QUERY_STRING),
        }
    }

    /// Whether the process was started by a web server.
    pub fn is_cgi(&self) -> bool {
        self.method.is_some() && self.content_type.is_some() && self.query_string.is_some()
    }

    /// Declared body length, or -1 when absent or without leading digits.
    ///
    /// Read like `atoi`: trailing garbage after the digits is ignored.
    pub fn declared_length(&self) -> i64 {
        self.content_length
            .as_deref()
            .and_then(|l| parse_int(l.as_bytes()))
            .unwrap_or(-1)
    }
}

/// Non-UTF-8 values are treated as absent.
fn var(name: &str) -> Option<String> {
    env::var_os(name).and_then(|v| v.into_string().ok())
}
