//! Check result types.
//!
//! Each check produces a [`CheckResult`]. Fan-out checks (one entry per
//! dependency, say) produce a batch: a result whose `children` hold the
//! individual outcomes and whose status is derived from them.

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Success,
    Error,
}

/// Why a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The isolated environment directory does not exist.
    MissingDirectory,
    /// The isolated environment exists but is not the active one.
    NotActive,
    /// The dependency manifest does not exist.
    MissingManifest,
    /// A listed dependency cannot be imported.
    ImportFailure,
    /// The broker control tool is not installed.
    ExecutableNotFound,
    /// The broker does not answer on its endpoint.
    ServiceUnreachable,
    /// No start command is known for this platform.
    UnrecognizedPlatform,
}

/// The result of one check, or of a batch of checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub kind: Option<FailureKind>,
    pub message: String,
    pub children: Vec<CheckResult>,
    batch: bool,
}

impl CheckResult {
    /// A passing leaf result.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            kind: None,
            message: message.into(),
            children: Vec::new(),
            batch: false,
        }
    }

    /// A failing leaf result.
    pub fn error(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            kind: Some(kind),
            message: message.into(),
            children: Vec::new(),
            batch: false,
        }
    }

    /// A fan-out result. Its status is `Error` if any child failed.
    pub fn batch(children: Vec<CheckResult>) -> Self {
        let status = if children.iter().any(CheckResult::is_error) {
            CheckStatus::Error
        } else {
            CheckStatus::Success
        };
        Self {
            status,
            kind: None,
            message: String::new(),
            children,
            batch: true,
        }
    }

    /// Whether this result was built with [`CheckResult::batch`], even an
    /// empty one.
    pub fn is_batch(&self) -> bool {
        self.batch
    }

    pub fn is_error(&self) -> bool {
        self.status == CheckStatus::Error
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Success
    }
}

/// Whether every result passed.
pub fn passed(results: &[CheckResult]) -> bool {
    results.iter().all(CheckResult::is_success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_kind() {
        let result = CheckResult::success("ok");
        assert!(result.is_success());
        assert!(result.kind.is_none());
        assert!(!result.is_batch());
    }

    #[test]
    fn error_carries_kind() {
        let result = CheckResult::error(FailureKind::NotActive, "activate it");
        assert!(result.is_error());
        assert_eq!(result.kind, Some(FailureKind::NotActive));
        assert_eq!(result.message, "activate it");
    }

    #[test]
    fn batch_with_any_error_is_error() {
        let result = CheckResult::batch(vec![
            CheckResult::success("a"),
            CheckResult::error(FailureKind::ImportFailure, "b"),
            CheckResult::success("c"),
        ]);
        assert!(result.is_batch());
        assert!(result.is_error());
    }

    #[test]
    fn batch_of_successes_is_success() {
        let result = CheckResult::batch(vec![CheckResult::success("a"), CheckResult::success("b")]);
        assert!(result.is_success());
    }

    #[test]
    fn empty_batch_is_still_a_batch() {
        let result = CheckResult::batch(Vec::new());
        assert!(result.is_success());
        assert!(result.is_batch());
        assert!(result.children.is_empty());
    }

    #[test]
    fn passed_requires_all_success() {
        assert!(passed(&[]));
        assert!(passed(&[CheckResult::success("a")]));
        assert!(!passed(&[
            CheckResult::success("a"),
            CheckResult::error(FailureKind::MissingManifest, "b"),
        ]));
    }
}
