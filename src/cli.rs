//! Command-line argument definitions for `timedline`.
//!
//! Uses [`clap`] derive macros for argument parsing. The surface is a single
//! positional format template; clap's own help and version handling is
//! disabled so the usage text and exit codes stay under our control.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;

/// Arguments that print usage to stdout when given alone.
const HELP_SPELLINGS: [&str; 3] = ["-h", "-?", "--help"];

/// Annotate each line from stdin with the time elapsed since the previous line.
///
/// Only ever parsed from `[progname, "--", template]`, so clap never sees a
/// template it could read as an option.
#[derive(Debug, Parser)]
#[command(
    name = "timedline",
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Output template; see the usage text for the escapes.
    #[arg(value_name = "format")]
    pub format: OsString,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `-h`, `-?` or `--help` on its own.
    Help,
    /// Run with this format template, byte for byte as given.
    Run(OsString),
    /// Wrong number of arguments.
    Misuse,
}

impl Cli {
    /// Parse the process arguments.
    pub fn invocation_from_env() -> Invocation {
        Self::invocation_from(std::env::args_os())
    }

    /// Parse an explicit argument list, program name first.
    ///
    /// The decision is made on the raw argument count: exactly one argument
    /// is the template unless it is a help spelling. `--`, bundled short
    /// flags and `--opt=value` forms have no special meaning.
    pub fn invocation_from<I, T>(args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 2 {
            log::debug!("expected one argument, got {}", args.len().saturating_sub(1));
            return Invocation::Misuse;
        }
        if HELP_SPELLINGS.iter().any(|spelling| args[1].as_os_str() == *spelling) {
            return Invocation::Help;
        }

        args.insert(1, OsString::from("--"));
        match Self::try_parse_from(args) {
            Ok(cli) => Invocation::Run(cli.format),
            Err(e) => {
                log::debug!("argument error: {e}");
                Invocation::Misuse
            }
        }
    }
}

/// Write the usage text for `progname`.
///
/// # Errors
///
/// Any error from `out`.
pub fn write_usage<W: Write + ?Sized>(progname: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage: {progname} format\n")?;
    out.write_all(
        b" %%: an % character\n \
          %i: input text\n \
          %t: time in hh:mm:ss.ms format\n \
          %s: time in seconds\n \
          %m: time in milliseconds\n \
          %u: time in microseconds\n \
          %nF: with\n   \
          n: An integer corresponding to the minimum size of the displayed number. \
          Spaces (or zeros if the number begins with 0) are placed to the left.\n   \
          F: s, m or u formats\n",
    )
}
