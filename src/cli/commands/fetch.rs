//! The `nwdiag fetch` command, also the default when no subcommand is given.
//!
//! Downloads a diagnostic module and runs its entry point. Module steps are
//! served by [`DiagnosticHost`], which maps them onto the other commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bootstrap::{Bootstrap, CollectorKind, HttpFetcher, ModuleHost};
use crate::cli::args::FetchArgs;
use crate::config::COMMAND_TIMEOUT;
use crate::error::{DiagError, Result};
use crate::shell;

use super::broker::BrokerCommand;
use super::core::CoreCommand;
use super::dispatcher::{Command, CommandResult};
use super::env::EnvCommand;

/// Runs module steps against the real collectors.
pub struct DiagnosticHost<'w> {
    project_root: PathBuf,
    console: &'w mut dyn Write,
}

impl<'w> DiagnosticHost<'w> {
    pub fn new(project_root: &Path, console: &'w mut dyn Write) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            console,
        }
    }
}

impl ModuleHost for DiagnosticHost<'_> {
    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.console, "{}", text) {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }

    fn collect(&mut self, kind: CollectorKind) -> Result<()> {
        tracing::debug!("Module requested collector {:?}", kind);
        match kind {
            CollectorKind::Core => CoreCommand::new(&self.project_root).execute()?,
            CollectorKind::Env => EnvCommand::new(&self.project_root).execute()?,
            CollectorKind::Broker => BrokerCommand::new(&self.project_root).execute()?,
        };
        Ok(())
    }

    fn command(&mut self, command_line: &str) -> Result<()> {
        let result = shell::execute(command_line, Some(&self.project_root), COMMAND_TIMEOUT)?;
        write!(self.console, "{}", result.stdout)?;
        write!(self.console, "{}", result.stderr)?;
        if result.success {
            Ok(())
        } else {
            Err(DiagError::CommandFailed {
                command: command_line.to_string(),
                code: result.exit_code,
            })
        }
    }
}

pub struct FetchCommand {
    project_root: PathBuf,
    args: FetchArgs,
}

impl FetchCommand {
    pub fn new(project_root: &Path, args: FetchArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    pub fn args(&self) -> &FetchArgs {
        &self.args
    }

    /// Run the bootstrap, writing diagnostics and module output to `console`.
    pub fn run_with(&self, console: &mut dyn Write) -> CommandResult {
        let bootstrap = Bootstrap::new()
            .with_entry_point(&self.args.entry)
            .with_fetcher(HttpFetcher::with_timeout(Duration::from_secs(
                self.args.timeout,
            )));

        let mut module_console = std::io::stdout();
        let mut host = DiagnosticHost::new(&self.project_root, &mut module_console);
        let outcome = bootstrap.fetch_and_run(&self.args.url, &mut host, console);
        CommandResult::from_passed(outcome.is_completed())
    }
}

impl Command for FetchCommand {
    fn execute(&self) -> Result<CommandResult> {
        Ok(self.run_with(&mut std::io::stdout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn args(url: String) -> FetchArgs {
        FetchArgs {
            url,
            entry: "run_diagnostic".to_string(),
            timeout: 2,
        }
    }

    #[test]
    fn unreachable_url_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let console = MemorySink::new();
        let cmd = FetchCommand::new(temp.path(), args("http://127.0.0.1:1/m.yml".into()));

        let result = cmd.run_with(&mut console.clone());
        assert!(!result.success);
        assert!(console.contents().contains("http://127.0.0.1:1/m.yml"));
    }

    #[test]
    fn module_collect_writes_report() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/m.yml");
            then.status(200)
                .body("functions:\n  run_diagnostic:\n    - collect: core\n");
        });

        let temp = TempDir::new().unwrap();
        let console = MemorySink::new();
        let cmd = FetchCommand::new(temp.path(), args(server.url("/m.yml")));

        assert!(cmd.run_with(&mut console.clone()).success);
        assert!(temp.path().join(crate::config::CORE_REPORT).exists());
    }

    #[cfg(unix)]
    #[test]
    fn host_command_runs_in_project_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        let console = MemorySink::new();
        let mut writer = console.clone();
        let mut host = DiagnosticHost::new(temp.path(), &mut writer);

        host.command("ls").unwrap();
        assert!(console.contents().contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn host_command_failure_is_error() {
        let temp = TempDir::new().unwrap();
        let mut sink = MemorySink::new();
        let mut host = DiagnosticHost::new(temp.path(), &mut sink);

        let err = host.command("exit 4").unwrap_err();
        assert!(matches!(
            err,
            DiagError::CommandFailed { code: Some(4), .. }
        ));
    }
}
