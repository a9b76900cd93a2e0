//! Sequential, short-circuiting check execution.

use super::result::CheckResult;
use crate::report::Reporter;

/// What a check produced: one result, or one result per item it fanned out over.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Single(CheckResult),
    Batch(Vec<CheckResult>),
}

impl From<CheckResult> for CheckOutcome {
    fn from(result: CheckResult) -> Self {
        if result.is_batch() {
            CheckOutcome::Batch(result.children)
        } else {
            CheckOutcome::Single(result)
        }
    }
}

impl From<Vec<CheckResult>> for CheckOutcome {
    fn from(results: Vec<CheckResult>) -> Self {
        CheckOutcome::Batch(results)
    }
}

/// A diagnostic check.
///
/// Checks run in the order they were added to a [`Pipeline`]; a check may
/// assume every check before it passed.
pub trait Check {
    /// Short identifier used in debug logs.
    fn name(&self) -> &str;

    /// Run the check.
    fn run(&self) -> CheckOutcome;
}

struct FnCheck<F> {
    name: String,
    f: F,
}

impl<F, O> Check for FnCheck<F>
where
    F: Fn() -> O,
    O: Into<CheckOutcome>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> CheckOutcome {
        (self.f)().into()
    }
}

/// An ordered list of checks that stops at the first failure.
#[derive(Default)]
pub struct Pipeline<'a> {
    checks: Vec<Box<dyn Check + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Append a closure check.
    pub fn check<F, O>(mut self, name: &str, f: F) -> Self
    where
        F: Fn() -> O + 'a,
        O: Into<CheckOutcome> + 'a,
    {
        self.checks.push(Box::new(FnCheck {
            name: name.to_string(),
            f,
        }));
        self
    }

    /// Append a boxed check.
    pub fn push(&mut self, check: Box<dyn Check + 'a>) {
        self.checks.push(check);
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run checks in order, logging every result.
    ///
    /// A single result is followed by a divider and stops the run if it
    /// failed. A batch is logged in full, with no divider of its own, and
    /// stops the run if any member failed. Checks after the stopping point
    /// are never invoked. Returns every logged result, batches flattened.
    pub fn run(&self, reporter: &mut Reporter) -> Vec<CheckResult> {
        let mut results = Vec::new();

        for check in &self.checks {
            tracing::debug!("Running check '{}'", check.name());

            match check.run() {
                CheckOutcome::Single(result) => {
                    reporter.line(&result.message);
                    reporter.divider();
                    let failed = result.is_error();
                    results.push(result);
                    if failed {
                        tracing::debug!("Check '{}' failed; stopping", check.name());
                        break;
                    }
                }
                CheckOutcome::Batch(batch) => {
                    for result in &batch {
                        reporter.line(&result.message);
                    }
                    let failed = batch.iter().any(CheckResult::is_error);
                    results.extend(batch);
                    if failed {
                        tracing::debug!("Check '{}' had failures; stopping", check.name());
                        break;
                    }
                }
            }
        }

        results
    }
}
