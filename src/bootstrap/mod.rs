//! Remote diagnostic modules.
//!
//! The default `nwdiag` run downloads a module from a pinned URL, loads it
//! into its own namespace and calls its `run_diagnostic` function. Steps in
//! the module call back into a [`ModuleHost`], which the CLI implements
//! with the real collectors.
//!
//! # Trust
//!
//! This is trust-on-first-use. The download is not signed or checksummed,
//! and a module's `command` steps run arbitrary shell commands on this
//! machine. Only point nwdiag at URLs you trust.
//!
//! Every failure (network, decode, missing entry point, failing step) is
//! printed as one line and returned as a [`BootstrapOutcome`]; none of them
//! panics or aborts the process.

pub mod fetch;
pub mod interpolation;
pub mod module;

pub use fetch::HttpFetcher;
pub use module::{CollectorKind, EntryPoint, ModuleHost, RemoteModule, Step, Symbol};

use crate::config::ENTRY_POINT;
use crate::error::DiagError;
use std::io::Write;

/// How a bootstrap run ended.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The entry point ran to completion.
    Completed,
    /// The module loaded but has no callable entry point.
    EntryPointMissing,
    /// Fetching, loading or running the module failed.
    Failed(DiagError),
}

impl BootstrapOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BootstrapOutcome::Completed)
    }
}

/// Fetches a module and invokes its entry point.
pub struct Bootstrap {
    fetcher: HttpFetcher,
    entry_point: String,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
            entry_point: ENTRY_POINT.to_string(),
        }
    }

    /// Look up a different function name.
    pub fn with_entry_point(mut self, name: &str) -> Self {
        self.entry_point = name.to_string();
        self
    }

    pub fn with_fetcher(mut self, fetcher: HttpFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Fetch `url`, load it and run the entry point against `host`.
    ///
    /// Diagnostics go to `console`, one line per failure.
    pub fn fetch_and_run(
        &self,
        url: &str,
        host: &mut dyn ModuleHost,
        console: &mut dyn Write,
    ) -> BootstrapOutcome {
        let module = match self
            .fetcher
            .fetch(url)
            .and_then(|source| RemoteModule::load(url, &source))
        {
            Ok(module) => module,
            Err(e) => {
                tracing::warn!("Bootstrap from {} failed: {}", url, e);
                say(
                    console,
                    &format!("Failed to fetch and execute code from {}. Reason: {}", url, e),
                );
                return BootstrapOutcome::Failed(e);
            }
        };

        let Some(entry) = module.entry_point(&self.entry_point) else {
            tracing::debug!(
                "{} declares {:?} but no function '{}'",
                module.source_name(),
                module.names().collect::<Vec<_>>(),
                self.entry_point
            );
            say(
                console,
                &format!(
                    "Failed to fetch or find the {} function.",
                    self.entry_point
                ),
            );
            return BootstrapOutcome::EntryPointMissing;
        };

        match entry.invoke(host) {
            Ok(()) => BootstrapOutcome::Completed,
            Err(e) => {
                say(console, &format!("{} failed: {}", self.entry_point, e));
                BootstrapOutcome::Failed(e)
            }
        }
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch `url` and run its `run_diagnostic` function with default settings.
pub fn fetch_and_run(
    url: &str,
    host: &mut dyn ModuleHost,
    console: &mut dyn Write,
) -> BootstrapOutcome {
    Bootstrap::new().fetch_and_run(url, host, console)
}

fn say(console: &mut dyn Write, line: &str) {
    if let Err(e) = writeln!(console, "{}", line) {
        tracing::warn!("Failed to write to console: {}", e);
    }
}
