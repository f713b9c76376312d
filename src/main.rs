//! texmend CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use texmend::cli::Cli;
use texmend::supervisor::{self, Supervisor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG, `--quiet` to ERROR
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool, quiet: bool) {
    let filter = if debug {
        EnvFilter::new("texmend=debug")
    } else if quiet {
        EnvFilter::new("texmend=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("texmend=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.quiet);

    tracing::debug!("texmend starting with args: {:?}", cli);
    supervisor::log_preflight();

    let mut supervisor = Supervisor::new(cli.compiler_args);
    match supervisor.compile_and_install() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style(format!("Error: {}", e)).red());
            ExitCode::from(1)
        }
    }
}
