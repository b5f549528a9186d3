//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → inside a per-request span carrying the request ID
//!
//! Consumer:
//!     → stderr, which the web server appends to its error log
//! ```

pub mod logging;

pub use logging::init_logging;
