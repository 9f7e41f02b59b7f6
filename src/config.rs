//! Runtime configuration.
//!
//! The only user setting is the format template. Everything else here is
//! resolved from the process environment once, at startup:
//! 1. Program name used in diagnostics (`argv[0]`)
//! 2. Whether diagnostics on stderr are highlighted
//! 3. Whether stdout is flushed after every line

use std::ffi::OsString;
use std::io::{self, IsTerminal};

/// Program name used when `argv[0]` is unavailable.
pub const DEFAULT_PROGNAME: &str = "timedline";

/// Runtime configuration resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The format template, byte for byte as given on the command line.
    pub template: Vec<u8>,
    /// Program name as invoked, for diagnostics.
    pub progname: String,
    /// Highlight the offending part of a format error.
    pub color_diagnostics: bool,
    /// Flush output after every line (interactive use).
    pub line_flush: bool,
}

impl Config {
    /// Build a [`Config`] for `template`, reading `argv[0]`, terminal state and
    /// color environment variables from the running process.
    pub fn from_env(template: OsString) -> Self {
        Self {
            template: template.into_encoded_bytes(),
            progname: progname(),
            color_diagnostics: resolve_color(io::stderr().is_terminal(), |key| {
                std::env::var_os(key)
            }),
            line_flush: io::stdout().is_terminal(),
        }
    }
}

/// `argv[0]` as invoked, falling back to [`DEFAULT_PROGNAME`].
pub fn progname() -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGNAME.to_string())
}

/// Decide whether stderr diagnostics get color.
///
/// Colors only when stderr is a terminal, `NO_COLOR` is unset or empty and
/// `TERM` is not `dumb`. A non-empty `FORCE_COLOR` enables them regardless.
fn resolve_color(is_terminal: bool, var: impl Fn(&str) -> Option<OsString>) -> bool {
    if var("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
        return true;
    }
    if !is_terminal {
        return false;
    }
    if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if var("TERM").is_some_and(|v| v == "dumb") {
        return false;
    }
    true
}
