//! Unified error type for ledger operations.

use kasbon_core::account::AccountError;
use kasbon_core::journal::JournalError;
use kasbon_core::tenancy::TenancyError;
use kasbon_shared::{AccountId, ErrorKind};
use thiserror::Error;

use crate::snapshot::StoreError;

/// Errors surfaced by the ledger repositories and the payment processor.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account rule violation.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Journal rule or chain violation.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Ownership or visibility violation.
    #[error(transparent)]
    Tenancy(#[from] TenancyError),

    /// Snapshot store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Another writer won the race for this account. Retryable.
    #[error("Concurrent modification of account {0}, please retry")]
    ConcurrencyConflict(AccountId),

    /// Journal replay does not reproduce the stored balance.
    #[error("Replay of account {id} yields {replayed}, stored balance is {stored}")]
    ReplayMismatch {
        /// The account.
        id: AccountId,
        /// Balance on the account record.
        stored: rust_decimal::Decimal,
        /// Balance derived from the journal.
        replayed: rust_decimal::Decimal,
    },
}

impl LedgerError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Account(err) => err.kind(),
            Self::Journal(err) => err.kind(),
            Self::Tenancy(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::ConcurrencyConflict(_) => ErrorKind::ConcurrencyConflict,
            Self::ReplayMismatch { .. } => ErrorKind::InvariantViolation,
        }
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}
