use std::io::{self, BufWriter};
use std::process::ExitCode;

use timedline::cli::{self, Cli, Invocation};
use timedline::config::{self, Config};
use timedline::{Engine, MonotonicClock, Template, TimedlineError};

fn main() -> ExitCode {
    init_logging();

    let config = match Cli::invocation_from_env() {
        Invocation::Run(template) => Config::from_env(template),
        Invocation::Help => {
            // Nowhere left to report a failed help write.
            let _ = cli::write_usage(&config::progname(), &mut io::stdout().lock());
            return ExitCode::SUCCESS;
        }
        Invocation::Misuse => {
            let _ = cli::write_usage(&config::progname(), &mut io::stderr().lock());
            return exit_with(&TimedlineError::Usage(
                "expected exactly one format argument".to_string(),
            ));
        }
    };

    let template = match Template::compile(&config.template) {
        Ok(template) => template,
        Err(e) => {
            let _ = e.write_diagnostic(
                &mut io::stderr().lock(),
                &config.progname,
                &config.template,
                config.color_diagnostics,
            );
            return exit_with(&TimedlineError::from(e));
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    let mut engine = Engine::new(template, MonotonicClock).with_line_flush(config.line_flush);

    match engine.run(stdin.lock(), writer) {
        Ok(records) => {
            log::debug!("input exhausted after {records} records");
            ExitCode::SUCCESS
        }
        // Downstream went away: stop quietly.
        Err(e) => exit_with(&e),
    }
}

fn exit_with(err: &TimedlineError) -> ExitCode {
    log::debug!("exiting with code {}: {err}", err.exit_code());
    ExitCode::from(err.exit_code())
}

/// Logging is off unless `TIMEDLINE_LOG` sets a filter (e.g. `debug`).
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TIMEDLINE_LOG", "off"))
        .format_timestamp(None)
        .init();
}
