//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_MODULE_URL, ENTRY_POINT, FETCH_TIMEOUT};

/// Printed after `--help`.
const MODULE_HELP: &str = "\
With no subcommand, nwdiag downloads the YAML diagnostic module shipped as
plugins/nw_check_core.yml from a pinned URL and runs its run_diagnostic
function. If that URL does not serve the module, the failure is printed and
nothing else runs; host a copy and point `nwdiag fetch --url <URL>` or
NWDIAG_URL at it. Modules are not verified and may run shell commands: only
use URLs you trust.";

/// nwdiag - diagnostic reports for your machine, Python environment and RabbitMQ.
#[derive(Debug, Parser)]
#[command(name = "nwdiag")]
#[command(author, version, about, long_about = None)]
#[command(after_help = MODULE_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to inspect and write reports into (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report operating system, runtime and terminal facts (00_check_core.txt)
    Core,

    /// Check the .venv virtual environment and requirements.txt (00_check_env.txt)
    Env,

    /// Check that RabbitMQ is installed and running (00_report_rabbitmq.txt)
    Broker,

    /// Fetch a diagnostic module and run its entry point (default)
    Fetch(FetchArgs),
}

/// Arguments for `nwdiag fetch`.
#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// URL serving a YAML diagnostic module (see plugins/nw_check_core.yml)
    #[arg(long, env = "NWDIAG_URL", default_value = DEFAULT_MODULE_URL)]
    pub url: String,

    /// Function to invoke in the loaded module
    #[arg(long, default_value = ENTRY_POINT)]
    pub entry: String,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            url: std::env::var("NWDIAG_URL").unwrap_or_else(|_| DEFAULT_MODULE_URL.to_string()),
            entry: ENTRY_POINT.to_string(),
            timeout: FETCH_TIMEOUT.as_secs(),
        }
    }
}
