//! Shared request builders for integration tests.

use xhtml_cgi::cgi::CgiEnv;

pub const BOUNDARY: &str = "XYZ";

/// Multipart body builder following the strict field grammar.
#[derive(Debug, Default)]
pub struct BodyBuilder {
    body: Vec<u8>,
}

#[allow(dead_code)]
impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ordinary field.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
        self
    }

    /// Append raw bytes, for malformed fields.
    pub fn raw(mut self, bytes: &str) -> Self {
        self.body.extend_from_slice(bytes.as_bytes());
        self
    }

    /// Append the payload field and the closing delimiter.
    pub fn payload(mut self, doc: &str) -> Vec<u8> {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"html\"\r\n\r\n{doc}\r\n--{BOUNDARY}--\r\n")
                .as_bytes(),
        );
        self.body
    }

    pub fn build(self) -> Vec<u8> {
        self.body
    }
}

/// CGI environment for a multipart POST of `body`.
#[allow(dead_code)]
pub fn multipart_env(method: &str, body: &[u8]) -> CgiEnv {
    CgiEnv {
        method: Some(method.to_string()),
        content_type: Some(format!("multipart/form-data; boundary={BOUNDARY}")),
        content_length: Some(body.len().to_string()),
        query_string: Some(String::new()),
    }
}

/// CGI environment for a direct `text/html` POST of `body`.
#[allow(dead_code)]
pub fn direct_env(query: &str, body: &[u8]) -> CgiEnv {
    CgiEnv {
        method: Some("POST".to_string()),
        content_type: Some("text/html; charset=utf-8".to_string()),
        content_length: Some(body.len().to_string()),
        query_string: Some(query.to_string()),
    }
}
