//! The diagnostic check pipeline.
//!
//! - [`CheckResult`] - what a check reports
//! - [`Check`] - the check trait; closures work through [`Pipeline::check`]
//! - [`Pipeline`] - ordered execution that stops at the first failure

pub mod result;
pub mod runner;

pub use result::{passed, CheckResult, CheckStatus, FailureKind};
pub use runner::{Check, CheckOutcome, Pipeline};
