//! Command-line interface for nwdiag.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FetchArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, DiagnosticHost};
