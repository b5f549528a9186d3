//! Command-line mode, used when the process is not started by a web server.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::cgi::params::{Applied, ParameterRegistry, Settings};
use crate::config::{GatewayConfig, CONFIG_ENV};
use crate::convert::{ConversionError, Converter, DoctypeTable};

#[derive(Debug, Default, Parser)]
#[command(name = "xhtml-cgi")]
#[command(version, about = "Convert HTML documents to XHTML (CGI program or command line)", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Output doctype (transitional, strict, frameset, 1.1, basic-1.0, ...).
    #[arg(short = 't', long)]
    pub doctype: Option<String>,

    /// Spaces per tab (0-16).
    #[arg(short = 'b', long)]
    pub tab_length: Option<String>,

    /// Line wrap width (40 or more).
    #[arg(short = 'l', long)]
    pub line_length: Option<String>,

    /// Input file; standard input when omitted.
    pub input: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid value {value:?} for --{option}")]
    InvalidOption { option: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("conversion failed{}: {}", line_suffix(.0.line), .0.message)]
    Conversion(ConversionError),
}

fn line_suffix(line: Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

/// Settings for a command-line run: config defaults, then options.
pub fn cli_settings(cli: &Cli, config: &GatewayConfig, doctypes: &dyn DoctypeTable) -> Result<Settings, CliError> {
    let registry = ParameterRegistry::new(doctypes);
    let mut settings = Settings::from_defaults(&config.defaults, doctypes);
    settings.html_output = false;

    let options = [
        ("doctype", &b"type"[..], &cli.doctype),
        ("tab-length", &b"tablength"[..], &cli.tab_length),
        ("line-length", &b"linelength"[..], &cli.line_length),
    ];
    for (option, name, value) in options {
        let Some(value) = value else { continue };
        if let Applied::Rejected(_) = registry.apply(&mut settings, name, value.as_bytes()) {
            return Err(CliError::InvalidOption {
                option,
                value: value.clone(),
            });
        }
    }
    Ok(settings)
}

/// Convert the input named by `cli` (or `stdin`) and write it to `out`.
pub fn run<R: Read, W: Write>(
    cli: &Cli,
    config: &GatewayConfig,
    doctypes: &dyn DoctypeTable,
    converter: &dyn Converter,
    stdin: R,
    mut out: W,
) -> Result<(), CliError> {
    let settings = cli_settings(cli, config, doctypes)?;

    let input = match &cli.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            let mut stdin = stdin;
            stdin.read_to_end(&mut buf)?;
            buf
        }
    };

    tracing::debug!(input_len = input.len(), ?settings, "Converting from command line");
    let doc = converter.convert(&input, &settings, doctypes).map_err(CliError::Conversion)?;
    out.write_all(&doc.body)?;
    out.flush()?;
    Ok(())
}
