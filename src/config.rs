//! Program constants.
//!
//! nwdiag has no configuration files. Everything tunable lives here; a few
//! values can be overridden from the command line (see [`crate::cli::Cli`]).

use std::time::Duration;

/// Rule printed between report sections.
pub const DIVIDER: &str =
    "======================================================================";

/// Greeting printed at the top of every report.
pub const WELCOME: &str = "Welcome to NW Diagnostics!";

/// Report written by `nwdiag core`.
pub const CORE_REPORT: &str = "00_check_core.txt";

/// Report written by `nwdiag env`.
pub const ENV_REPORT: &str = "00_check_env.txt";

/// Report written by `nwdiag broker`.
pub const BROKER_REPORT: &str = "00_report_rabbitmq.txt";

/// Pinned location of the remote diagnostic module.
///
/// This is where `plugins/nw_check_core.yml` is published. Until a copy is
/// served there the default run reports the fetch failure and exits; point
/// `--url` or `NWDIAG_URL` at any host serving the module instead.
///
/// Trust-on-first-use: the content is not signed or checksummed.
pub const DEFAULT_MODULE_URL: &str =
    "https://raw.githubusercontent.com/denisecase/nw-diagnostics/main/nw_check_core.yml";

/// Function looked up in a loaded module and invoked with no arguments.
pub const ENTRY_POINT: &str = "run_diagnostic";

/// Timeout for the module fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for any external program (rabbitmqctl, python, module commands).
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for each broker socket operation.
pub const BROKER_TIMEOUT: Duration = Duration::from_secs(3);

/// Default AMQP endpoint of a local broker.
pub const BROKER_HOST: &str = "localhost";
pub const BROKER_PORT: u16 = 5672;

/// Isolated environment directory expected in the project.
pub const VENV_DIR: &str = ".venv";

/// Dependency manifest expected in the project.
pub const MANIFEST_FILE: &str = "requirements.txt";

pub const CREATE_VENV_COMMAND: &str = "python -m venv .venv";
pub const ACTIVATE_COMMAND_WINDOWS: &str = ".venv\\Scripts\\activate";
pub const ACTIVATE_COMMAND_UNIX: &str = "source .venv/bin/activate";
pub const UPGRADE_PIP_COMMAND: &str = "python -m pip install --upgrade pip";
pub const INSTALL_REQUIREMENTS_COMMAND: &str = "python -m pip install -r requirements.txt";
