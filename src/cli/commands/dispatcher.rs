//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, FetchArgs};
use crate::error::Result;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Diagnostic failures are reported in the output and reflected in
    /// [`CommandResult::success`]; `Err` is reserved for the machinery
    /// failing (report file not writable, for example).
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether every check the command ran passed.
    pub success: bool,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { success: true }
    }

    /// Create a failure result.
    pub fn failure() -> Self {
        Self { success: false }
    }

    /// Result reflecting `passed`.
    pub fn from_passed(passed: bool) -> Self {
        Self { success: passed }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Core) => super::core::CoreCommand::new(&self.project_root).execute(),
            Some(Commands::Env) => super::env::EnvCommand::new(&self.project_root).execute(),
            Some(Commands::Broker) => {
                super::broker::BrokerCommand::new(&self.project_root).execute()
            }
            Some(Commands::Fetch(args)) => {
                super::fetch::FetchCommand::new(&self.project_root, args.clone()).execute()
            }
            None => {
                // Default to fetching the pinned module
                super::fetch::FetchCommand::new(&self.project_root, FetchArgs::default())
                    .execute()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        assert!(CommandResult::success().success);
        assert!(!CommandResult::failure().success);
        assert_eq!(CommandResult::from_passed(true), CommandResult::success());
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn dispatch_env_writes_into_project_root() {
        use clap::Parser;

        let temp = tempfile::TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let result = dispatcher
            .dispatch(&Cli::parse_from(["nwdiag", "env"]))
            .unwrap();

        assert!(!result.success);
        assert!(temp.path().join(crate::config::ENV_REPORT).exists());
    }

    #[test]
    fn dispatch_into_missing_directory_is_error() {
        use clap::Parser;

        let dispatcher = CommandDispatcher::new(PathBuf::from("/nonexistent/nwdiag/project"));
        let result = dispatcher.dispatch(&Cli::parse_from(["nwdiag", "core"]));
        assert!(result.is_err());
    }
}
