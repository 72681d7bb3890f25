//! Account error types for validation and lifecycle errors.

use kasbon_shared::{AccountId, ErrorKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    // ========== Validation Errors ==========
    /// Customer name is required.
    #[error("Customer name must not be empty")]
    EmptyCustomerName,

    /// Phone number is required.
    #[error("Phone number must not be empty")]
    EmptyPhone,

    /// Credit limit cannot be negative.
    #[error("Credit limit cannot be negative: {0}")]
    NegativeCreditLimit(Decimal),

    // ========== Invariant Errors ==========
    /// A credit limit may never be set below what is already owed.
    #[error("Credit limit {limit} is below the current balance {balance}")]
    CreditLimitBelowBalance {
        /// The rejected credit limit.
        limit: Decimal,
        /// The account's current balance.
        balance: Decimal,
    },

    // ========== Lifecycle Errors ==========
    /// Account not found (or not visible to the caller).
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Accounts with an outstanding balance cannot be deleted.
    #[error("Account {id} has an outstanding balance of {balance}")]
    BalanceOutstanding {
        /// The account.
        id: AccountId,
        /// The nonzero balance blocking deletion.
        balance: Decimal,
    },

    /// Employee-derived accounts are exempt from deletion.
    #[error("Account {0} is employee-derived and cannot be deleted")]
    EmployeeAccount(AccountId),

    /// Closed accounts admit no further status transitions.
    #[error("Account {0} is closed")]
    AccountClosed(AccountId),
}

impl AccountError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCustomerName | Self::EmptyPhone | Self::NegativeCreditLimit(_) => {
                ErrorKind::Validation
            }
            Self::CreditLimitBelowBalance { .. } => ErrorKind::InvariantViolation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::BalanceOutstanding { .. } | Self::EmployeeAccount(_) | Self::AccountClosed(_) => {
                ErrorKind::PreconditionFailed
            }
        }
    }
}
