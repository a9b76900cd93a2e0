//! The `nwdiag core` command: system and runtime facts.

use std::path::{Path, PathBuf};

use crate::collectors::SystemFacts;
use crate::config::CORE_REPORT;
use crate::error::Result;
use crate::report::Reporter;

use super::dispatcher::{Command, CommandResult};

pub struct CoreCommand {
    project_root: PathBuf,
}

impl CoreCommand {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    /// Write the report through `reporter` instead of the default sinks.
    pub fn run_with(&self, reporter: &mut Reporter) -> CommandResult {
        SystemFacts::collect().report(reporter);
        CommandResult::success()
    }
}

impl Command for CoreCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut reporter = Reporter::create(&self.project_root.join(CORE_REPORT))?;
        Ok(self.run_with(&mut reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_core_report() {
        let temp = TempDir::new().unwrap();
        let result = CoreCommand::new(temp.path()).execute().unwrap();
        assert!(result.success);

        let text = std::fs::read_to_string(temp.path().join(CORE_REPORT)).unwrap();
        assert!(text.contains("Welcome to NW Diagnostics!"));
        assert!(text.contains(" Number of CPUs: "));
        assert!(text.contains(" Git available in PATH: "));
    }
}
