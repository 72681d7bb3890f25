//! Tenancy error types.

use kasbon_shared::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ownership checks.
#[derive(Debug, Error)]
pub enum TenancyError {
    /// No record with the given id exists in the collection.
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    /// The record exists but is owned by a different scope.
    ///
    /// Surfaced explicitly so callers can distinguish "nothing to delete"
    /// from "not allowed to delete".
    #[error("Caller scope does not own record {0}")]
    PermissionDenied(Uuid),
}

impl TenancyError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
        }
    }
}
