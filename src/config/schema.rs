//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the config file.
//! Every field has a default so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Conversion settings used before caller parameters are applied.
    pub defaults: ConversionDefaults,

    /// Request intake settings.
    pub request: RequestConfig,

    /// Response page settings.
    pub response: ResponseConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConversionDefaults {
    /// Doctype catalogue key (e.g., "strict"). Unset lets the converter decide.
    pub doctype: Option<String>,

    /// Spaces per tab.
    pub tab_length: u32,

    /// Line wrap width.
    pub line_length: u32,

    /// Wrap converted documents in the HTML result page.
    pub html_output: bool,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            doctype: None,
            tab_length: 2,
            line_length: 80,
            html_output: true,
        }
    }
}

/// Request intake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Largest accepted `CONTENT_LENGTH` in bytes.
    pub max_body_size: usize,

    /// Cut the payload at the closing multipart boundary before conversion.
    pub trim_trailing_boundary: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            trim_trailing_boundary: true,
        }
    }
}

/// Response page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Charset announced in the success Content-Type.
    pub charset: String,

    /// Title of the result page.
    pub title: String,

    /// Stylesheet linked from the result page.
    pub stylesheet_href: Option<String>,

    /// "Back" link target on the result page.
    pub home_href: Option<String>,

    /// Append internal request state to result and error pages.
    pub debug: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            charset: "iso-8859-1".to_string(),
            title: "xhtml-cgi - page translated".to_string(),
            stylesheet_href: None,
            home_href: None,
            debug: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format (compact, pretty, json).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
        }
    }
}
