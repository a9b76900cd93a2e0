//! Fact collectors.
//!
//! Three independent diagnostics share nothing but the
//! [`Reporter`](crate::report::Reporter) they write to:
//!
//! - [`system`] - host, runtime and terminal facts rendered as one block
//! - [`environment`] - `.venv` and `requirements.txt` checks
//! - [`broker`] - RabbitMQ installed/running checks
//!
//! [`python`], [`manifest`] and [`terminal`] are the probes they build on.

pub mod broker;
pub mod environment;
pub mod manifest;
pub mod python;
pub mod system;
pub mod terminal;

pub use broker::BrokerCollector;
pub use environment::EnvironmentCollector;
pub use manifest::{parse_dependencies, read_dependencies};
pub use python::{ImportProbe, Interpreter, PythonInfo};
pub use system::SystemFacts;
pub use terminal::TerminalInfo;
