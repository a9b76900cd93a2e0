//! Best-effort terminal and shell detection.

/// Where the diagnostic is being run from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalInfo {
    /// `VS Code` or `Native Terminal`.
    pub environment: String,
    /// Lower-cased shell name, empty when unknown.
    pub shell: String,
}

impl TerminalInfo {
    /// Detect using the process environment.
    pub fn detect() -> Self {
        Self::detect_with_env(|key: &str| std::env::var(key))
    }

    /// Detect with a custom env var lookup function.
    pub fn detect_with_env<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let term_program = env_fn("TERM_PROGRAM").unwrap_or_default();

        if term_program == "vscode" {
            let version = env_fn("TERM_PROGRAM_VERSION")
                .unwrap_or_default()
                .to_lowercase();
            let shell = if version.contains("powershell") {
                "powershell".to_string()
            } else {
                shell_from_env(&env_fn)
            };
            Self {
                environment: "VS Code".to_string(),
                shell,
            }
        } else {
            Self {
                environment: "Native Terminal".to_string(),
                shell: shell_from_env(&env_fn),
            }
        }
    }
}

/// Last segment of `SHELL` (or `ComSpec`), lower-cased.
fn shell_from_env<F>(env_fn: &F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let path = env_fn("SHELL")
        .or_else(|_| env_fn("ComSpec"))
        .unwrap_or_default();
    path.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn native_terminal_uses_shell_basename() {
        let info = TerminalInfo::detect_with_env(env(&[("SHELL", "/usr/bin/ZSH")]));
        assert_eq!(info.environment, "Native Terminal");
        assert_eq!(info.shell, "zsh");
    }

    #[test]
    fn vscode_with_powershell_marker() {
        let info = TerminalInfo::detect_with_env(env(&[
            ("TERM_PROGRAM", "vscode"),
            ("TERM_PROGRAM_VERSION", "1.85.0-PowerShell"),
            ("SHELL", "/bin/bash"),
        ]));
        assert_eq!(info.environment, "VS Code");
        assert_eq!(info.shell, "powershell");
    }

    #[test]
    fn vscode_without_marker_falls_back_to_shell() {
        let info = TerminalInfo::detect_with_env(env(&[
            ("TERM_PROGRAM", "vscode"),
            ("TERM_PROGRAM_VERSION", "1.85.0"),
            ("SHELL", "/bin/bash"),
        ]));
        assert_eq!(info.environment, "VS Code");
        assert_eq!(info.shell, "bash");
    }

    #[test]
    fn comspec_used_when_shell_missing() {
        let info = TerminalInfo::detect_with_env(env(&[(
            "ComSpec",
            "C:\\Windows\\System32\\CMD.EXE",
        )]));
        assert_eq!(info.shell, "cmd.exe");
    }

    #[test]
    fn unknown_environment_degrades_to_empty_shell() {
        let info = TerminalInfo::detect_with_env(env(&[]));
        assert_eq!(info.environment, "Native Terminal");
        assert_eq!(info.shell, "");
    }
}
