//! The `nwdiag broker` command: RabbitMQ checks.

use std::path::{Path, PathBuf};

use crate::collectors::BrokerCollector;
use crate::config::BROKER_REPORT;
use crate::error::Result;
use crate::pipeline::passed;
use crate::report::Reporter;

use super::dispatcher::{Command, CommandResult};

pub struct BrokerCommand {
    project_root: PathBuf,
}

impl BrokerCommand {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    pub fn run_with(&self, reporter: &mut Reporter) -> CommandResult {
        let results = BrokerCollector::new().run(reporter);
        CommandResult::from_passed(passed(&results))
    }
}

impl Command for BrokerCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut reporter = Reporter::create(&self.project_root.join(BROKER_REPORT))?;
        Ok(self.run_with(&mut reporter))
    }
}
