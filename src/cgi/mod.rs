//! CGI request front-end.
//!
//! # Data Flow
//! ```text
//! environment (REQUEST_METHOD, CONTENT_TYPE, CONTENT_LENGTH, QUERY_STRING)
//!     → env.rs (read signals)
//!     → classify.rs (RequestStatus, Boundary)
//!     → multipart.rs over cursor.rs (fields, payload start)
//!       or query.rs (direct uploads)
//!     → params.rs (validated Settings)
//!     → payload.rs (payload extent)
//!     → handler.rs (converter + response)
//! ```
//!
//! # Design Decisions
//! - One explicit RequestContext per request instead of process globals
//! - Field names and values are borrowed from the body, never copied
//! - Parsing is strict and single-pass; the first error ends the request

pub mod classify;
pub mod context;
pub mod cursor;
pub mod env;
pub mod error;
pub mod handler;
pub mod multipart;
pub mod params;
pub mod payload;
pub mod query;

pub use classify::{classify, Boundary, RequestStatus};
pub use context::RequestContext;
pub use cursor::InputCursor;
pub use env::CgiEnv;
pub use error::CgiError;
pub use handler::{startup_failed, Gateway, Outcome};
pub use multipart::{Field, MultipartError, MultipartScanner, ScanFailure, Step};
pub use params::{Applied, Parameter, ParameterRegistry, Settings};
