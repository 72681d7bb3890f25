//! Application-wide error classification.
//!
//! Every domain error enum in the workspace maps itself onto one of these
//! kinds via a `kind()` method, so callers can branch on the class of
//! failure without matching concrete variants across crates.

use serde::{Deserialize, Serialize};

/// Classification of ledger errors.
///
/// `ConcurrencyConflict` is the only kind that is safe to retry
/// automatically; all other kinds require the caller to change something
/// before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input (empty required field, non-positive amount).
    Validation,
    /// Referenced entity does not exist or is not visible to the caller.
    NotFound,
    /// The operation would break a documented invariant.
    InvariantViolation,
    /// A state-dependent rule blocks the action.
    PreconditionFailed,
    /// The caller's scope does not own the record.
    PermissionDenied,
    /// Optimistic version check failed; retry with a fresh read.
    ConcurrencyConflict,
    /// Underlying snapshot store failed.
    Storage,
}

impl ErrorKind {
    /// Returns the stable error code for this kind.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::InvariantViolation => "INVARIANT_VIOLATION",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::Storage => "STORAGE_ERROR",
        }
    }

    /// Returns true if an operation failing with this kind may be retried
    /// automatically.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}
