//! Journal error types.

use kasbon_shared::{ErrorKind, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building or replaying journal entries.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Amounts are always stored positive.
    #[error("Transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// An entry's `balance_before` does not continue the chain.
    #[error(
        "Journal chain broken at entry {id}: expected balance before {expected}, found {found}"
    )]
    ChainDiscontinuity {
        /// The offending entry.
        id: TransactionId,
        /// Balance the chain dictates.
        expected: Decimal,
        /// Balance recorded on the entry.
        found: Decimal,
    },

    /// An entry's `balance_after` does not match its own arithmetic.
    #[error(
        "Snapshot mismatch at entry {id}: expected balance after {expected}, found {found}"
    )]
    SnapshotMismatch {
        /// The offending entry.
        id: TransactionId,
        /// `kind.apply(balance_before, amount)`.
        expected: Decimal,
        /// Balance recorded on the entry.
        found: Decimal,
    },
}

impl JournalError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NonPositiveAmount(_) => ErrorKind::Validation,
            Self::ChainDiscontinuity { .. } | Self::SnapshotMismatch { .. } => {
                ErrorKind::InvariantViolation
            }
        }
    }
}
