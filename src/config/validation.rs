//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (tab length, line length, body limit)
//! - Check that the default doctype exists in the catalogue
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Defaults must satisfy the same rules caller parameters do

use thiserror::Error;

use crate::cgi::params::{MAX_TAB_LENGTH, MIN_LINE_LENGTH};
use crate::config::schema::GatewayConfig;
use crate::convert::DoctypeTable;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["compact", "pretty", "json"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("defaults.tab_length {0} exceeds 16")]
    TabLength(u32),

    #[error("defaults.line_length {0} is below 40")]
    LineLength(u32),

    #[error("defaults.doctype {0:?} is not a known doctype")]
    UnknownDoctype(String),

    #[error("request.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("response.charset must not be empty")]
    EmptyCharset,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.log_format {0:?} is not one of compact, pretty, json")]
    LogFormat(String),
}

/// Check `config` against the catalogue in `doctypes`.
pub fn validate_config(
    config: &GatewayConfig,
    doctypes: &dyn DoctypeTable,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let defaults = &config.defaults;

    if defaults.tab_length > MAX_TAB_LENGTH {
        errors.push(ValidationError::TabLength(defaults.tab_length));
    }
    if defaults.line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::LineLength(defaults.line_length));
    }
    if let Some(key) = &defaults.doctype {
        if doctypes.lookup(key.as_bytes()).is_none() {
            errors.push(ValidationError::UnknownDoctype(key.clone()));
        }
    }
    if config.request.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.response.charset.trim().is_empty() {
        errors.push(ValidationError::EmptyCharset);
    }

    let level = &config.observability.log_level;
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(level.clone()));
    }
    let format = &config.observability.log_format;
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ValidationError::LogFormat(format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StaticDoctypes;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&GatewayConfig::default(), &StaticDoctypes), Ok(()));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = GatewayConfig::default();
        config.defaults.tab_length = 17;
        config.defaults.line_length = 39;
        config.defaults.doctype = Some("html5".into());
        config.request.max_body_size = 0;
        config.observability.log_format = "xml".into();

        let errors = validate_config(&config, &StaticDoctypes).unwrap_err();

        assert_eq!(
            errors,
            vec![
                ValidationError::TabLength(17),
                ValidationError::LineLength(39),
                ValidationError::UnknownDoctype("html5".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::LogFormat("xml".into()),
            ]
        );
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut config = GatewayConfig::default();
        config.defaults.tab_length = 16;
        config.defaults.line_length = 40;
        config.defaults.doctype = Some("mp-1.2".into());
        config.observability.log_level = "DEBUG".into();
        assert_eq!(validate_config(&config, &StaticDoctypes), Ok(()));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::TabLength(20);
        assert_eq!(err.to_string(), "defaults.tab_length 20 exceeds 16");
    }
}
