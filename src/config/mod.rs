//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → Settings seeded from [defaults] for each request
//! ```
//!
//! # Design Decisions
//! - Config is read once per process (one process per request)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ConversionDefaults, GatewayConfig, ObservabilityConfig, RequestConfig, ResponseConfig};
pub use validation::ValidationError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "XHTML_CGI_CONFIG";
