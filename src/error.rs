//! Error types for nwdiag operations.
//!
//! This module defines [`DiagError`], the error type used by the bootstrap
//! and shell layers, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Check-level failures (missing `.venv`, broker down, ...) are not errors.
//!   They are [`FailureKind`](crate::pipeline::FailureKind)s carried on a
//!   [`CheckResult`](crate::pipeline::CheckResult).
//! - `DiagError` covers failures of the machinery itself: fetching, loading
//!   and invoking remote modules, and running external programs.
//! - Every `DiagError` is caught and printed before the process exits; none
//!   of them changes the exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nwdiag operations.
#[derive(Debug, Error)]
pub enum DiagError {
    /// Fetching a remote module failed (connect error, timeout, non-2xx).
    #[error("{reason}")]
    NetworkFailure { url: String, reason: String },

    /// Fetched content is not valid text or not a valid diagnostic module.
    #[error("could not load module from {source_name}: {message}")]
    DecodeFailure {
        source_name: String,
        message: String,
    },

    /// The loaded module does not expose the requested entry point.
    #[error("module has no callable entry point '{name}'")]
    MissingEntryPoint { name: String },

    /// An external command could not be run or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command exceeded its time budget and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut { command: String, seconds: u64 },

    /// A report file could not be created.
    #[error("Cannot write report file {path}: {source}")]
    ReportFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for nwdiag operations.
pub type Result<T> = std::result::Result<T, DiagError>;
