//! The report writer shared by every diagnostic.

use crate::config::{DIVIDER, WELCOME};
use crate::error::{DiagError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A labeled fact in a rendered block.
///
/// An empty label renders the value on its own, which is how the banner
/// line at the top of a block is expressed.
pub type Field = (&'static str, String);

/// Writes report lines to the console and a report file at the same time.
///
/// Created once per diagnostic run and passed by `&mut` to whatever needs to
/// log. The file is truncated when the reporter is created, so each run
/// replaces the previous report.
pub struct Reporter {
    sinks: Vec<Box<dyn Write>>,
    path: Option<PathBuf>,
}

impl Reporter {
    /// Create a reporter writing to stdout and to `path` (truncated).
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| DiagError::ReportFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Writing report to {}", path.display());

        Ok(Self {
            sinks: vec![Box::new(std::io::stdout()), Box::new(file)],
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a reporter over arbitrary sinks.
    pub fn with_sinks(sinks: Vec<Box<dyn Write>>) -> Self {
        Self { sinks, path: None }
    }

    /// The report file, when this reporter writes to one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write one line to every sink.
    pub fn line(&mut self, text: &str) {
        for sink in &mut self.sinks {
            if let Err(e) = writeln!(sink, "{}", text).and_then(|_| sink.flush()) {
                tracing::warn!("Failed to write report line: {}", e);
            }
        }
    }

    /// Write the divider rule.
    pub fn divider(&mut self) {
        self.line(DIVIDER);
    }

    /// Write a pre-rendered block to every sink.
    pub fn emit(&mut self, text: &str) {
        self.line(text.trim_end_matches('\n'));
    }

    /// Write the standard report header: divider, welcome and timestamp.
    pub fn header(&mut self) {
        self.divider();
        self.line(WELCOME);
        self.line(&format!("At: {}", timestamp()));
    }

    /// Render labeled fields into a bordered block.
    ///
    /// Field order is preserved. The block opens and closes with a double
    /// divider.
    pub fn render(fields: &[Field]) -> String {
        let mut out = String::new();
        out.push_str(DIVIDER);
        out.push('\n');
        out.push_str(DIVIDER);
        out.push('\n');
        for (label, value) in fields {
            if label.is_empty() {
                out.push_str(&format!(" {}\n", value));
            } else {
                out.push_str(&format!(" {}: {}\n", label, value));
            }
        }
        out.push_str(DIVIDER);
        out.push('\n');
        out.push_str(DIVIDER);
        out.push('\n');
        out
    }
}

/// Local date and 12-hour time, e.g. `2024-01-31 at 03:07 PM`.
pub fn timestamp() -> String {
    let now = chrono::Local::now();
    format!("{} at {}", now.format("%Y-%m-%d"), now.format("%I:%M %p"))
}
