//! xhtml-cgi
//!
//! Converts uploaded HTML documents to XHTML. Started by a web server it acts
//! as a CGI program; started from a shell it converts a file.
//!
//! # Architecture Overview
//!
//! ```text
//!   web server (CGI)                         shell
//!        │ env + stdin                         │ argv + file/stdin
//!        ▼                                     ▼
//!  ┌───────────┐   NotCgi    ┌──────────────────────┐
//!  │  cgi::    │────────────▶│ cli::run             │
//!  │  Gateway  │             └──────────┬───────────┘
//!  └─────┬─────┘                        │
//!        │ classify → scan → params     │ options → params
//!        ▼                              ▼
//!  ┌──────────────────────────────────────────────┐
//!  │             convert::Converter               │
//!  └─────┬────────────────────────────────────────┘
//!        ▼
//!  ┌───────────────┐
//!  │ http::Response│──▶ stdout
//!  └───────────────┘
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use xhtml_cgi::cgi::{startup_failed, CgiEnv, Gateway, Outcome};
use xhtml_cgi::cli::{self, Cli};
use xhtml_cgi::config::{load_or_default, GatewayConfig, CONFIG_ENV};
use xhtml_cgi::convert::{DoctypeTable, PassthroughConverter, StaticDoctypes};
use xhtml_cgi::observability::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = CgiEnv::from_process();
    let doctypes = StaticDoctypes;
    let converter = PassthroughConverter;

    // Under CGI the arguments belong to the web server, so only the
    // environment can name a config file.
    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = match start(config_path.as_deref(), &doctypes) {
        Ok(config) => config,
        Err(e) => match startup_failed(&env) {
            Outcome::Respond(response) => {
                // No subscriber is installed yet.
                eprintln!("xhtml-cgi: startup failed: {e}");
                response.write_cgi(&mut io::stdout().lock())?;
                return Ok(());
            }
            Outcome::NotCgi => return Err(e),
        },
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "xhtml-cgi starting");

    let gateway = Gateway::new(&config, &doctypes, &converter);
    match gateway.handle(&env, io::stdin().lock()) {
        Outcome::Respond(response) => {
            let mut stdout = io::stdout().lock();
            response.write_cgi(&mut stdout)?;
            Ok(())
        }
        Outcome::NotCgi => {
            let args = Cli::parse();
            let config = match &args.config {
                Some(path) if Some(path) != config_path.as_ref() => load_or_default(Some(path), &doctypes)?,
                _ => config,
            };
            cli::run(&args, &config, &doctypes, &converter, io::stdin().lock(), io::stdout().lock())?;
            io::stdout().flush()?;
            Ok(())
        }
    }
}

/// Load the configuration and install logging.
fn start(path: Option<&Path>, doctypes: &dyn DoctypeTable) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    let config = load_or_default(path, doctypes)?;
    init_logging(&config.observability)?;
    Ok(config)
}
