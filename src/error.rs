//! Error types for the `timedline` application.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use thiserror::Error;

/// Errors produced while compiling a format template.
///
/// Both variants map to exit code 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Unrecognized escape, malformed width or missing unit selector.
    ///
    /// `position` is the byte offset of the offending `%`.
    #[error("Invalid format at position {position}")]
    Syntax { position: usize },

    /// The template compiled to zero parts.
    #[error("empty format")]
    Empty,
}

impl TemplateError {
    /// Write the stderr line: `<progname>: <message>`, followed for syntax
    /// errors by the template from the offending `%` onwards.
    ///
    /// The template tail is written byte for byte; only the highlighted form
    /// goes through a lossy UTF-8 conversion.
    ///
    /// # Errors
    ///
    /// Any error from `out`.
    pub fn write_diagnostic<W: Write + ?Sized>(
        &self,
        out: &mut W,
        progname: &str,
        template: &[u8],
        use_color: bool,
    ) -> io::Result<()> {
        match *self {
            Self::Syntax { position } => {
                let rest = template.get(position..).unwrap_or_default();
                write!(out, "{progname}: {self}: ")?;
                if use_color {
                    write!(out, "{}", String::from_utf8_lossy(rest).red().bold())?;
                } else {
                    out.write_all(rest)?;
                }
                out.write_all(b"\n")
            }
            Self::Empty => writeln!(out, "{progname}: {self}"),
        }
    }
}

/// Errors that can occur in `timedline`.
///
/// Maps to exit codes: [`Usage`](Self::Usage) → exit 1,
/// [`Template`](Self::Template) → exit 2, [`Write`](Self::Write) → exit 0
/// (a closed downstream pipe ends processing quietly).
#[derive(Debug, Error)]
pub enum TimedlineError {
    /// Wrong number of command-line arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// The format template did not compile.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The output sink rejected a write or flush.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),
}

impl TimedlineError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::Template(_) => 2,
            Self::Write(_) => 0,
        }
    }
}
