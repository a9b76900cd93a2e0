//! Python interpreter discovery and probing.
//!
//! nwdiag is a native binary, so facts about "the interpreter" come from
//! running the Python that a student would get by typing `python` in the
//! same shell: the active virtual environment's interpreter if there is
//! one, otherwise the first `python3`/`python` on `PATH`.

use crate::config::COMMAND_TIMEOUT;
use crate::shell::{resolve_tool_path, run_program, which, Platform};
use std::path::{Path, PathBuf};

const INFO_SCRIPT: &str = "import platform, sys
print(platform.python_version())
print(platform.python_build()[1])
print(platform.python_compiler())
print(platform.python_implementation())
print(sys.executable)
print(sys.prefix)";

const PATH_SCRIPT: &str = "import sys
print('\\n'.join(sys.path))";

/// Facts reported by a Python interpreter about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInfo {
    pub version: String,
    pub build_date: String,
    pub compiler: String,
    pub implementation: String,
    pub executable: String,
    pub prefix: String,
}

impl PythonInfo {
    /// Parse the output of the info script, one fact per line.
    pub fn parse(stdout: &str) -> Option<Self> {
        let mut lines = stdout.lines().map(str::trim);
        Some(Self {
            version: lines.next()?.to_string(),
            build_date: lines.next()?.to_string(),
            compiler: lines.next()?.to_string(),
            implementation: lines.next()?.to_string(),
            executable: lines.next()?.to_string(),
            prefix: lines.next()?.to_string(),
        })
    }
}

/// Answers whether a module can be imported.
pub trait ImportProbe {
    fn can_import(&self, module: &str) -> bool;
}

/// A Python interpreter found on this machine.
#[derive(Debug, Clone)]
pub struct Interpreter {
    path: PathBuf,
}

impl Interpreter {
    /// Wrap an interpreter at a known path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Find the interpreter using the process environment.
    pub fn discover() -> Option<Self> {
        Self::discover_with_env(|key: &str| std::env::var(key))
    }

    /// Find the interpreter with a custom env var lookup function.
    ///
    /// Prefers the interpreter inside `VIRTUAL_ENV`, then `python3` and
    /// `python` on `PATH` (`python` first on Windows).
    pub fn discover_with_env<F>(env_fn: F) -> Option<Self>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let platform = Platform::current();

        if let Ok(venv) = env_fn("VIRTUAL_ENV") {
            let bin = venv_bin_dir(Path::new(&venv), &platform);
            for name in ["python", "python3"] {
                if let Some(path) = resolve_tool_path(name, &[bin.clone()]) {
                    return Some(Self::at(path));
                }
            }
        }

        let names: &[&str] = if platform.is_windows() {
            &["python", "python3"]
        } else {
            &["python3", "python"]
        };
        names.iter().find_map(|name| which(name)).map(Self::at)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ask the interpreter about itself.
    pub fn info(&self) -> Option<PythonInfo> {
        match run_program(&self.path, &["-c", INFO_SCRIPT], None, COMMAND_TIMEOUT) {
            Ok(result) if result.success => PythonInfo::parse(&result.stdout),
            Ok(result) => {
                tracing::warn!(
                    "{} exited with {:?}: {}",
                    self.path.display(),
                    result.exit_code,
                    result.stderr.trim()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Failed to run {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// The interpreter's module search path (`sys.path`).
    pub fn search_paths(&self) -> Vec<String> {
        match run_program(&self.path, &["-c", PATH_SCRIPT], None, COMMAND_TIMEOUT) {
            Ok(result) if result.success => result
                .stdout
                .lines()
                .map(|l| l.trim_end().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl ImportProbe for Interpreter {
    fn can_import(&self, module: &str) -> bool {
        if !is_module_name(module) {
            tracing::debug!("'{}' is not an importable module name", module);
            return false;
        }
        let script = format!("import {}", module);
        match run_program(&self.path, &["-c", &script], None, COMMAND_TIMEOUT) {
            Ok(result) => result.success,
            Err(e) => {
                tracing::warn!("Import probe for '{}' failed: {}", module, e);
                false
            }
        }
    }
}

/// Stand-in used when no interpreter was found: nothing imports.
impl ImportProbe for Option<Interpreter> {
    fn can_import(&self, module: &str) -> bool {
        self.as_ref().is_some_and(|i| i.can_import(module))
    }
}

/// Dotted Python identifier, e.g. `pika` or `google.protobuf`.
pub fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn venv_bin_dir(venv: &Path, platform: &Platform) -> PathBuf {
    if platform.is_windows() {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::VarError;

    #[test]
    fn parse_reads_six_lines() {
        let info = PythonInfo::parse(
            "3.12.1\nDec  7 2023 22:03:25\nClang 15.0.0\nCPython\n/usr/bin/python3\n/usr\n",
        )
        .unwrap();
        assert_eq!(info.version, "3.12.1");
        assert_eq!(info.build_date, "Dec  7 2023 22:03:25");
        assert_eq!(info.compiler, "Clang 15.0.0");
        assert_eq!(info.implementation, "CPython");
        assert_eq!(info.executable, "/usr/bin/python3");
        assert_eq!(info.prefix, "/usr");
    }

    #[test]
    fn parse_rejects_short_output() {
        assert!(PythonInfo::parse("3.12.1\nCPython\n").is_none());
    }

    #[test]
    fn module_names() {
        assert!(is_module_name("pika"));
        assert!(is_module_name("google.protobuf"));
        assert!(is_module_name("_private"));
        assert!(!is_module_name(""));
        assert!(!is_module_name("python-dotenv"));
        assert!(!is_module_name("2fast"));
        assert!(!is_module_name("os; import shutil"));
        assert!(!is_module_name("a..b"));
    }

    #[test]
    fn missing_interpreter_imports_nothing() {
        let none: Option<Interpreter> = None;
        assert!(!none.can_import("os"));
    }

    #[test]
    fn invalid_name_is_not_importable_without_running() {
        let interpreter = Interpreter::at("/nonexistent/python");
        assert!(!interpreter.can_import("not-a-module"));
    }

    #[test]
    fn nonexistent_interpreter_has_no_info() {
        let interpreter = Interpreter::at("/nonexistent/python");
        assert!(interpreter.info().is_none());
        assert!(interpreter.search_paths().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn discover_prefers_virtual_env() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let python = bin.join("python");
        std::fs::write(&python, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        let venv = temp.path().to_string_lossy().to_string();
        let found = Interpreter::discover_with_env(move |key: &str| {
            if key == "VIRTUAL_ENV" {
                Ok(venv.clone())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();
        assert_eq!(found.path(), python.as_path());
    }
}
