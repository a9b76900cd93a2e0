//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and owns the report file
//! it writes. Commands are dispatched via [`CommandDispatcher`].

pub mod broker;
pub mod core;
pub mod dispatcher;
pub mod env;
pub mod fetch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use fetch::DiagnosticHost;
