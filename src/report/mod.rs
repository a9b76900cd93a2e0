//! Report rendering and emission.
//!
//! - [`Reporter`] - writes lines to the console and a truncated report file
//! - [`MemorySink`] - in-memory sink for capturing report output

pub mod reporter;
pub mod sink;

pub use reporter::{timestamp, Field, Reporter};
pub use sink::MemorySink;
