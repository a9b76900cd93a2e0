//! nwdiag - diagnostic reports for a developer machine.
//!
//! nwdiag runs sequences of checks against the local machine, a Python
//! virtual environment and a RabbitMQ broker, and writes what it finds to
//! both the terminal and a plain-text report file. With no subcommand it
//! downloads a diagnostic module from a pinned URL and runs that instead.
//!
//! # Modules
//!
//! - [`bootstrap`] - Fetching and running remote diagnostic modules
//! - [`cli`] - Command-line interface and argument parsing
//! - [`collectors`] - System, environment and broker fact gathering
//! - [`config`] - Fixed file names, URLs and timeouts
//! - [`error`] - Error types and result aliases
//! - [`pipeline`] - Sequential check execution with short-circuiting
//! - [`report`] - Dual-sink report output
//! - [`shell`] - Subprocess execution and platform helpers
//!
//! # Trust
//!
//! Remote modules are trust-on-first-use: the download is not verified and
//! a module may run shell commands. See [`bootstrap`].
//!
//! # Example
//!
//! ```
//! use nwdiag::pipeline::{CheckResult, FailureKind, Pipeline};
//! use nwdiag::report::{MemorySink, Reporter};
//!
//! let sink = MemorySink::new();
//! let mut reporter = Reporter::with_sinks(vec![Box::new(sink.clone())]);
//!
//! let pipeline = Pipeline::new()
//!     .check("first", || CheckResult::success("ok"))
//!     .check("second", || CheckResult::error(FailureKind::MissingManifest, "missing"))
//!     .check("third", || CheckResult::success("never runs"));
//!
//! let results = pipeline.run(&mut reporter);
//! assert_eq!(results.len(), 2);
//! assert!(!sink.contents().contains("never runs"));
//! ```

pub mod bootstrap;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod shell;

pub use error::{DiagError, Result};
