//! HTML to XHTML conversion gateway, run as a CGI program.

pub mod cgi;
pub mod cli;
pub mod config;
pub mod convert;
pub mod http;
pub mod observability;

pub use cgi::{Gateway, Outcome};
pub use config::GatewayConfig;
