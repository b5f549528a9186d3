//! Conversion parameters supplied by the caller.
//!
//! # Responsibilities
//! - Recognise parameter names (exact bytes, English and Spanish aliases)
//! - Validate values and apply them to [`Settings`]
//!
//! # Design Decisions
//! - Unknown names and invalid values are silently ignored; the default or
//!   previously applied value stands
//! - Integers are read the lenient way: leading blanks, optional sign, then
//!   as many digits as there are ("12px" reads as 12)

use std::borrow::Cow;

use crate::config::schema::ConversionDefaults;
use crate::convert::DoctypeTable;

/// Largest accepted tab length.
pub const MAX_TAB_LENGTH: u32 = 16;

/// Smallest accepted line width.
pub const MIN_LINE_LENGTH: u32 = 40;

/// Options handed to the converter and the response assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Index into the doctype catalogue; `None` lets the converter decide.
    pub doctype: Option<usize>,
    /// Wrap the converted document in the HTML result page.
    pub html_output: bool,
    /// Spaces per tab in the output.
    pub tab_length: u32,
    /// Line wrap width of the output.
    pub line_length: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            doctype: None,
            html_output: true,
            tab_length: 2,
            line_length: 80,
        }
    }
}

impl Settings {
    /// Seed settings from configured defaults. The doctype key is resolved
    /// against `doctypes`; an unknown key leaves the doctype unset.
    pub fn from_defaults(defaults: &ConversionDefaults, doctypes: &dyn DoctypeTable) -> Self {
        Self {
            doctype: defaults
                .doctype
                .as_deref()
                .and_then(|key| doctypes.lookup(key.as_bytes())),
            html_output: defaults.html_output,
            tab_length: defaults.tab_length,
            line_length: defaults.line_length,
        }
    }
}

/// Parameters the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// `type` / `tipo`: doctype catalogue key.
    Doctype,
    /// `output` / `salida`: `plain` disables the HTML result page.
    Output,
    /// `tablength`: integer in `0..=16`.
    TabLength,
    /// `linelength`: integer, at least 40.
    LineLength,
}

impl Parameter {
    /// Look a parameter up by its exact name.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"type" | b"tipo" => Some(Parameter::Doctype),
            b"output" | b"salida" => Some(Parameter::Output),
            b"tablength" => Some(Parameter::TabLength),
            b"linelength" => Some(Parameter::LineLength),
            _ => None,
        }
    }
}

/// Result of applying one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Value accepted; settings changed.
    Set(Parameter),
    /// Known parameter, value refused; settings untouched.
    Rejected(Parameter),
    /// Name not recognised; settings untouched.
    Unknown,
}

/// Applies named parameters to [`Settings`].
#[derive(Clone, Copy)]
pub struct ParameterRegistry<'a> {
    doctypes: &'a dyn DoctypeTable,
}

impl<'a> ParameterRegistry<'a> {
    pub fn new(doctypes: &'a dyn DoctypeTable) -> Self {
        Self { doctypes }
    }

    /// Validate `value` for `name` and apply it to `settings` if it passes.
    pub fn apply(&self, settings: &mut Settings, name: &[u8], value: &[u8]) -> Applied {
        let Some(param) = Parameter::from_name(name) else {
            tracing::debug!(name = %lossy(name), "Ignoring unknown parameter");
            return Applied::Unknown;
        };

        let accepted = match param {
            Parameter::Doctype => self
                .doctypes
                .lookup(value)
                .map(|index| settings.doctype = Some(index))
                .is_some(),
            Parameter::Output => {
                if value == b"plain" {
                    settings.html_output = false;
                }
                value == b"plain"
            }
            Parameter::TabLength => parse_int(value)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n <= MAX_TAB_LENGTH)
                .map(|n| settings.tab_length = n)
                .is_some(),
            Parameter::LineLength => parse_int(value)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n >= MIN_LINE_LENGTH)
                .map(|n| settings.line_length = n)
                .is_some(),
        };

        if accepted {
            tracing::debug!(?param, value = %lossy(value), "Parameter applied");
            Applied::Set(param)
        } else {
            tracing::debug!(?param, value = %lossy(value), "Parameter value rejected");
            Applied::Rejected(param)
        }
    }
}

impl std::fmt::Debug for ParameterRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterRegistry").finish_non_exhaustive()
    }
}

/// Lenient base-10 integer read.
///
/// Skips leading ASCII whitespace, accepts one optional sign, then reads
/// digits up to the first non-digit. Returns `None` when no digit is found or
/// the number does not fit in an `i64`.
pub fn parse_int(bytes: &[u8]) -> Option<i64> {
    let mut rest = bytes.trim_ascii_start();
    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in &rest[..digits] {
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }
    Some(if negative { -value } else { value })
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
