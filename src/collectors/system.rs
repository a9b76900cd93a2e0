//! Host, runtime and terminal facts (`nwdiag core`).

use super::python::{Interpreter, PythonInfo};
use super::terminal::TerminalInfo;
use crate::config::WELCOME;
use crate::report::{timestamp, Field, Reporter};
use crate::shell::which;
use sysinfo::System;

const NOT_FOUND: &str = "Not found";

/// Everything printed in the system report.
#[derive(Debug, Clone)]
pub struct SystemFacts {
    pub at: String,
    pub os_family: String,
    pub os_name: String,
    pub os_release: String,
    pub os_version: String,
    pub architecture: String,
    pub cpu_count: String,
    pub machine: String,
    pub python: Option<PythonInfo>,
    pub pip_env: String,
    pub cwd: String,
    pub exe_dir: String,
    pub exe: String,
    pub home: String,
    pub terminal: TerminalInfo,
    pub git_on_path: bool,
}

impl SystemFacts {
    /// Gather facts from the running system.
    pub fn collect() -> Self {
        let exe = std::env::current_exe().ok();
        let python = Interpreter::discover().and_then(|i| i.info());

        Self {
            at: timestamp(),
            os_family: std::env::consts::FAMILY.to_string(),
            os_name: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            os_release: System::kernel_version().unwrap_or_default(),
            os_version: System::long_os_version().unwrap_or_default(),
            architecture: format!("{}bit", usize::BITS),
            cpu_count: std::thread::available_parallelism()
                .map(|n| n.get().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            machine: std::env::consts::ARCH.to_string(),
            python,
            pip_env: std::env::var("PIP_DEFAULT_ENV").unwrap_or_else(|_| "None".to_string()),
            cwd: std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            exe_dir: exe
                .as_deref()
                .and_then(|p| p.parent())
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            exe: exe.map(|p| p.display().to_string()).unwrap_or_default(),
            home: dirs::home_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            terminal: TerminalInfo::detect(),
            git_on_path: which("git").is_some(),
        }
    }

    /// Labeled fields in report order.
    pub fn fields(&self) -> Vec<Field> {
        let python = self.python.as_ref();
        let py = |value: Option<&String>| value.cloned().unwrap_or_else(|| NOT_FOUND.to_string());
        let build = python
            .map(|info| format!("{} with {}", info.build_date, info.compiler))
            .unwrap_or_else(|| NOT_FOUND.to_string());

        vec![
            ("", WELCOME.to_string()),
            ("At", self.at.clone()),
            (
                "Operating System",
                format!("{} {} {}", self.os_family, self.os_name, self.os_release)
                    .trim_end()
                    .to_string(),
            ),
            ("OS Version", self.os_version.clone()),
            ("System Architecture", self.architecture.clone()),
            ("Number of CPUs", self.cpu_count.clone()),
            ("Machine Type", self.machine.clone()),
            ("Tool Version", format!("nwdiag {}", env!("CARGO_PKG_VERSION"))),
            ("Python Version", py(python.map(|i| &i.version))),
            ("Python Build Date and Compiler", build),
            ("Python Implementation", py(python.map(|i| &i.implementation))),
            ("Active pip environment", self.pip_env.clone()),
            ("Path to Interpreter", py(python.map(|i| &i.executable))),
            ("Path to virtual environment", py(python.map(|i| &i.prefix))),
            ("Current Working Directory", self.cwd.clone()),
            ("Path to source directory", self.exe_dir.clone()),
            ("Path to script file", self.exe.clone()),
            ("User's Home Directory", self.home.clone()),
            ("Terminal Environment", self.terminal.environment.clone()),
            ("Terminal Type", self.terminal.shell.clone()),
            (
                "Git available in PATH",
                if self.git_on_path { "True" } else { "False" }.to_string(),
            ),
        ]
    }

    /// Render and emit the report block.
    pub fn report(&self, reporter: &mut Reporter) {
        reporter.emit(&Reporter::render(&self.fields()));
    }
}
