//! HTTP response subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext + outcome (rejection, conversion error, RenderedDocument)
//!     → response.rs (status, content type, body)
//!     → templates.rs (result page envelope, error pages)
//!     → Response::write_cgi (stdout)
//! ```

pub mod response;
pub mod templates;

pub use response::{Response, ResponseAssembler};
