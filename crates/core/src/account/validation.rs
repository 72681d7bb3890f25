//! Pure validation rules for account operations.
//!
//! These functions contain no storage access; the repositories call them
//! before any write so a rejected operation leaves no partial state.

use rust_decimal::Decimal;

use super::error::AccountError;
use super::types::{AccountStatus, CreateAccountInput, CustomerAccount, UpdateProfileInput};

/// Validates input for account creation.
///
/// # Errors
///
/// Returns a validation error if the customer name or phone is empty or
/// the credit limit is negative.
pub fn validate_create(input: &CreateAccountInput) -> Result<(), AccountError> {
    if input.customer_name.trim().is_empty() {
        return Err(AccountError::EmptyCustomerName);
    }
    if input.phone.trim().is_empty() {
        return Err(AccountError::EmptyPhone);
    }
    if input.credit_limit < Decimal::ZERO {
        return Err(AccountError::NegativeCreditLimit(input.credit_limit));
    }
    Ok(())
}

/// Validates a profile update against the current account state.
///
/// # Errors
///
/// Returns `CreditLimitBelowBalance` if the new limit is below what the
/// customer already owes, and the usual validation errors for malformed
/// fields.
pub fn validate_profile_update(
    account: &CustomerAccount,
    input: &UpdateProfileInput,
) -> Result<(), AccountError> {
    if let Some(name) = &input.customer_name
        && name.trim().is_empty()
    {
        return Err(AccountError::EmptyCustomerName);
    }
    if let Some(phone) = &input.phone
        && phone.trim().is_empty()
    {
        return Err(AccountError::EmptyPhone);
    }
    if let Some(limit) = input.credit_limit {
        if limit < Decimal::ZERO {
            return Err(AccountError::NegativeCreditLimit(limit));
        }
        if limit < account.current_balance {
            return Err(AccountError::CreditLimitBelowBalance {
                limit,
                balance: account.current_balance,
            });
        }
    }
    Ok(())
}

/// Validates a status transition.
///
/// Suspend and activate are idempotent: moving to the current status is a
/// no-op, not an error. Closed accounts admit no transitions at all.
///
/// # Errors
///
/// Returns `AccountClosed` when the account is closed.
pub fn validate_status_transition(
    account: &CustomerAccount,
    target: AccountStatus,
) -> Result<(), AccountError> {
    if account.status.is_terminal() && target != account.status {
        return Err(AccountError::AccountClosed(account.id));
    }
    Ok(())
}

/// Validates that an account may be physically deleted.
///
/// Deletion never removes historical transactions; they remain addressable
/// by account id for audit.
///
/// # Errors
///
/// Returns `BalanceOutstanding` when the balance is nonzero and
/// `EmployeeAccount` for employee-derived accounts.
pub fn validate_delete(account: &CustomerAccount) -> Result<(), AccountError> {
    if !account.current_balance.is_zero() {
        return Err(AccountError::BalanceOutstanding {
            id: account.id,
            balance: account.current_balance,
        });
    }
    if account.is_employee {
        return Err(AccountError::EmployeeAccount(account.id));
    }
    Ok(())
}
