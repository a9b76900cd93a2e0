//! Platform identification and `PATH` lookup.

use std::path::{Path, PathBuf};

/// Operating systems nwdiag knows how to give advice for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
    /// Anything else, carrying the `std::env::consts::OS` identifier.
    Other(String),
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOS,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Whether this is Windows.
    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::MacOS => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Windows => write!(f, "windows"),
            Platform::Other(os) => write!(f, "{}", os),
        }
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over `path_entries`.
///
/// On Windows the bare name and the name with `.exe`, `.bat` and `.cmd`
/// appended are tried in each directory.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names: Vec<String> = if cfg!(windows) {
        vec![
            tool.to_string(),
            format!("{}.exe", tool),
            format!("{}.bat", tool),
            format!("{}.cmd", tool),
        ]
    } else {
        vec![tool.to_string()]
    };

    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Find `tool` on the process `PATH`.
pub fn which(tool: &str) -> Option<PathBuf> {
    resolve_tool_path(tool, &parse_system_path())
}
