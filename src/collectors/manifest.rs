//! Dependency manifest (`requirements.txt`) parsing.

use std::path::Path;

/// Characters that start a version pin (`==`, `>=`, `<=`, `~=`, `!=`, `===`, ...).
const PIN_CHARS: &[char] = &['=', '<', '>', '~', '!'];

/// Extract dependency names from manifest text.
///
/// One dependency per non-empty line: the trimmed text before the first
/// version-pin delimiter. Blank lines and `#` comments are skipped. Order is
/// preserved.
pub fn parse_dependencies(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let name = line.split(PIN_CHARS).next().unwrap_or_default();
            name.trim().to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Read dependency names from the manifest at `path`.
///
/// A missing or unreadable manifest yields an empty list; the manifest
/// existence check is what reports that problem.
pub fn read_dependencies(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_dependencies(&text),
        Err(e) => {
            tracing::debug!("No dependencies read from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
