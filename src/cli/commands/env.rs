//! The `nwdiag env` command: virtual environment checks.

use std::path::{Path, PathBuf};

use crate::collectors::environment::log_search_paths;
use crate::collectors::{EnvironmentCollector, Interpreter};
use crate::config::ENV_REPORT;
use crate::error::Result;
use crate::pipeline::passed;
use crate::report::Reporter;

use super::dispatcher::{Command, CommandResult};

pub struct EnvCommand {
    project_root: PathBuf,
}

impl EnvCommand {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    pub fn run_with(&self, reporter: &mut Reporter) -> CommandResult {
        let results = EnvironmentCollector::new(&self.project_root).run(reporter);
        if let Some(interpreter) = Interpreter::discover() {
            log_search_paths(reporter, &interpreter);
        }
        CommandResult::from_passed(passed(&results))
    }
}

impl Command for EnvCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut reporter = Reporter::create(&self.project_root.join(ENV_REPORT))?;
        Ok(self.run_with(&mut reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_project_fails_on_venv_dir() {
        let temp = TempDir::new().unwrap();
        let result = EnvCommand::new(temp.path()).execute().unwrap();
        assert!(!result.success);

        let text = std::fs::read_to_string(temp.path().join(ENV_REPORT)).unwrap();
        assert!(text.contains("ERROR: Missing .venv directory."));
        assert!(!text.contains("requirements.txt file exists"));
    }
}
