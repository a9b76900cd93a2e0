//! External program execution and platform lookup.

pub mod command;
pub mod platform;

pub use command::{execute, run_program, CommandResult};
pub use platform::{is_executable, parse_system_path, resolve_tool_path, which, Platform};
