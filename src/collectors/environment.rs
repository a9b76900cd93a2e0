//! Virtual environment checks (`nwdiag env`).

use super::manifest::read_dependencies;
use super::python::{ImportProbe, Interpreter};
use crate::config::{
    ACTIVATE_COMMAND_UNIX, ACTIVATE_COMMAND_WINDOWS, CREATE_VENV_COMMAND, DIVIDER,
    INSTALL_REQUIREMENTS_COMMAND, MANIFEST_FILE, UPGRADE_PIP_COMMAND, VENV_DIR,
};
use crate::pipeline::{passed, CheckResult, FailureKind, Pipeline};
use crate::report::Reporter;
use crate::shell::Platform;
use std::path::{Path, PathBuf};

type EnvFn = Box<dyn Fn(&str) -> Result<String, std::env::VarError>>;

/// Checks that a project's `.venv` exists, is active, and has every
/// dependency in `requirements.txt` installed.
pub struct EnvironmentCollector {
    root: PathBuf,
    platform: Platform,
    env_fn: EnvFn,
    probe: Box<dyn ImportProbe>,
}

impl EnvironmentCollector {
    /// Collector for `root` using the process environment and the
    /// discovered interpreter.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            platform: Platform::current(),
            env_fn: Box::new(|key: &str| std::env::var(key)),
            probe: Box::new(Interpreter::discover()),
        }
    }

    /// Replace the env var lookup.
    pub fn with_env<F>(mut self, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError> + 'static,
    {
        self.env_fn = Box::new(env_fn);
        self
    }

    /// Replace the import probe.
    pub fn with_probe(mut self, probe: impl ImportProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the platform used for the activation hint.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn check_venv_dir(&self) -> CheckResult {
        if self.root.join(VENV_DIR).exists() {
            CheckResult::success("YAY! .venv directory exists.")
        } else {
            CheckResult::error(
                FailureKind::MissingDirectory,
                format!(
                    "ERROR: Missing .venv directory. Create it (may take a while) using: {}",
                    CREATE_VENV_COMMAND
                ),
            )
        }
    }

    pub fn check_venv_active(&self) -> CheckResult {
        match (self.env_fn)("VIRTUAL_ENV") {
            Ok(path) if path.contains(VENV_DIR) => {
                CheckResult::success("YAY! The .venv virtual environment is active.")
            }
            _ => CheckResult::error(
                FailureKind::NotActive,
                format!(
                    "ERROR: Activate the .venv virtual environment using: {}",
                    self.activate_command()
                ),
            ),
        }
    }

    pub fn check_manifest(&self) -> CheckResult {
        if self.manifest_path().exists() {
            CheckResult::success("YAY! requirements.txt file exists.")
        } else {
            CheckResult::error(
                FailureKind::MissingManifest,
                "WARNING: No requirements.txt file found.\n\
                 SOLUTION: Create a new requirements.txt file in the repo folder.\n          \
                 In the file, list each external dependency on a separate line.",
            )
        }
    }

    /// One result per dependency listed in the manifest.
    pub fn check_dependencies(&self) -> Vec<CheckResult> {
        read_dependencies(&self.manifest_path())
            .into_iter()
            .map(|dep| {
                if self.probe.can_import(&dep) {
                    CheckResult::success(format!(
                        "YAY! {} is installed in the .venv.\n{}",
                        dep, DIVIDER
                    ))
                } else {
                    CheckResult::error(
                        FailureKind::ImportFailure,
                        format!(
                            "ERROR: {} is not installed in .venv.\n\
                             SOLUTION: Add the missing dependency to requirements.txt and install by running:\n{}",
                            dep, INSTALL_REQUIREMENTS_COMMAND
                        ),
                    )
                }
            })
            .collect()
    }

    /// The checks in the order they must run.
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new()
            .check("venv-dir", || self.check_venv_dir())
            .check("venv-active", || self.check_venv_active())
            .check("manifest", || self.check_manifest())
            .check("dependencies", || self.check_dependencies())
    }

    /// Run every check and log the outcome.
    pub fn run(&self, reporter: &mut Reporter) -> Vec<CheckResult> {
        reporter.header();
        reporter.divider();

        let results = self.pipeline().run(reporter);

        if passed(&results) && results.len() >= 3 {
            reporter.line("All checks passed successfully! Your environment is set up correctly.");
            reporter.line(&format!(
                "If it asks you to upgrade pip, please do so using: {}",
                UPGRADE_PIP_COMMAND
            ));
            reporter.divider();
        }

        results
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    fn activate_command(&self) -> &'static str {
        if self.platform.is_windows() {
            ACTIVATE_COMMAND_WINDOWS
        } else {
            ACTIVATE_COMMAND_UNIX
        }
    }
}

/// Log the interpreter's module search paths after the checks.
pub fn log_search_paths(reporter: &mut Reporter, interpreter: &Interpreter) {
    let paths = interpreter.search_paths();
    if paths.is_empty() {
        return;
    }
    reporter.line("Python's package search paths:");
    reporter.line(&"-".repeat(40));
    for path in paths {
        reporter.line(&path);
    }
    reporter.line(&"-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;
    use std::collections::HashSet;
    use std::env::VarError;
    use tempfile::TempDir;

    struct FakeProbe(HashSet<&'static str>);

    impl ImportProbe for FakeProbe {
        fn can_import(&self, module: &str) -> bool {
            self.0.contains(module)
        }
    }

    fn active_env(key: &str) -> Result<String, VarError> {
        if key == "VIRTUAL_ENV" {
            Ok("/home/student/project/.venv".to_string())
        } else {
            Err(VarError::NotPresent)
        }
    }

    fn no_env(_key: &str) -> Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    fn project(with_venv: bool, manifest: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        if with_venv {
            std::fs::create_dir_all(temp.path().join(".venv")).unwrap();
        }
        if let Some(text) = manifest {
            std::fs::write(temp.path().join("requirements.txt"), text).unwrap();
        }
        temp
    }

    fn collector(temp: &TempDir, installed: &[&'static str]) -> EnvironmentCollector {
        EnvironmentCollector::new(temp.path())
            .with_env(active_env)
            .with_platform(Platform::Linux)
            .with_probe(FakeProbe(installed.iter().copied().collect()))
    }

    fn reporter() -> (Reporter, MemorySink) {
        let sink = MemorySink::new();
        (Reporter::with_sinks(vec![Box::new(sink.clone())]), sink)
    }

    #[test]
    fn missing_venv_stops_pipeline() {
        let temp = project(false, Some("pika\n"));
        let (mut reporter, sink) = reporter();
        let results = collector(&temp, &[]).run(&mut reporter);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, Some(FailureKind::MissingDirectory));
        assert!(sink.contents().contains("python -m venv .venv"));
        assert!(!sink.contents().contains("active"));
    }

    #[test]
    fn inactive_venv_suggests_activation() {
        let temp = project(true, None);
        let collector = collector(&temp, &[]).with_env(no_env);
        let result = collector.check_venv_active();

        assert_eq!(result.kind, Some(FailureKind::NotActive));
        assert!(result.message.contains("source .venv/bin/activate"));
    }

    #[test]
    fn other_virtualenv_is_not_active() {
        let temp = project(true, None);
        let collector = collector(&temp, &[]).with_env(|key: &str| {
            if key == "VIRTUAL_ENV" {
                Ok("/home/student/venvs/other".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        });
        assert!(collector.check_venv_active().is_error());
    }

    #[test]
    fn windows_activation_hint() {
        let temp = project(true, None);
        let collector = collector(&temp, &[])
            .with_env(no_env)
            .with_platform(Platform::Windows);
        assert!(collector
            .check_venv_active()
            .message
            .contains(".venv\\Scripts\\activate"));
    }

    #[test]
    fn missing_manifest_reports_manifest_not_import() {
        let temp = project(true, None);
        let (mut reporter, _sink) = reporter();
        let collector = collector(&temp, &[]);

        assert!(collector.check_dependencies().is_empty());

        let results = collector.run(&mut reporter);
        let last = results.last().unwrap();
        assert_eq!(last.kind, Some(FailureKind::MissingManifest));
        assert!(results
            .iter()
            .all(|r| r.kind != Some(FailureKind::ImportFailure)));
    }

    #[test]
    fn dependency_fan_out_logs_every_result() {
        let temp = project(true, Some("pika==1.3\nmissingpkg\nrequests\n"));
        let (mut reporter, sink) = reporter();
        let results = collector(&temp, &["pika", "requests"]).run(&mut reporter);

        assert_eq!(results.len(), 6);
        assert!(results[3].is_success());
        assert_eq!(results[4].kind, Some(FailureKind::ImportFailure));
        assert!(results[5].is_success());

        let text = sink.contents();
        assert!(text.contains("YAY! pika is installed"));
        assert!(text.contains("ERROR: missingpkg is not installed"));
        assert!(text.contains("YAY! requests is installed"));
        assert!(!text.contains("All checks passed"));
    }

    #[test]
    fn installed_dependency_carries_its_own_divider() {
        let temp = project(true, Some("pika\nmissingpkg\n"));
        let (mut reporter, sink) = reporter();
        collector(&temp, &["pika"]).run(&mut reporter);

        let lines = sink.lines();
        let pika = lines
            .iter()
            .position(|l| l == "YAY! pika is installed in the .venv.")
            .unwrap();
        assert_eq!(lines[pika + 1], DIVIDER);
        assert!(lines[pika + 2].starts_with("ERROR: missingpkg is not installed"));
        assert!(lines.last().unwrap().starts_with("python -m pip install"));
    }

    #[test]
    fn all_passing_prints_success_message() {
        let temp = project(true, Some("pika\n"));
        let (mut reporter, sink) = reporter();
        let results = collector(&temp, &["pika"]).run(&mut reporter);

        assert!(passed(&results));
        assert!(sink.contents().contains("All checks passed successfully!"));
        assert!(sink.contents().contains(UPGRADE_PIP_COMMAND));
    }

    #[test]
    fn report_starts_with_header() {
        let temp = project(false, None);
        let (mut reporter, sink) = reporter();
        collector(&temp, &[]).run(&mut reporter);

        let lines = sink.lines();
        assert_eq!(lines[1], crate::config::WELCOME);
        assert!(lines[2].starts_with("At: "));
    }
}
