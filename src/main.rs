//! nwdiag CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nwdiag::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so they never end up mixed into report output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("nwdiag=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nwdiag=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("nwdiag starting with args: {:?}", cli);

    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let dispatcher = CommandDispatcher::new(project_root);

    // Failed checks are findings, not process failures
    match dispatcher.dispatch(&cli) {
        Ok(result) => {
            tracing::debug!("Finished, all checks passed: {}", result.success);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
    ExitCode::SUCCESS
}
