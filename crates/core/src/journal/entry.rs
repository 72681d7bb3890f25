//! Journal entry construction and account application.

use chrono::Utc;
use kasbon_shared::TransactionId;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{CustomerTransaction, EntryDetails, TransactionKind};
use crate::account::types::CustomerAccount;

/// Builds a journal entry against the account's current balance.
///
/// Snapshots `balance_before` from the account and computes
/// `balance_after` through [`TransactionKind::apply`]. The entry is not
/// persisted here; the caller writes it together with the updated account
/// as one atomic unit.
///
/// # Errors
///
/// Returns `NonPositiveAmount` when `amount <= 0`.
pub fn build_entry(
    account: &CustomerAccount,
    kind: TransactionKind,
    amount: Decimal,
    details: EntryDetails,
) -> Result<CustomerTransaction, JournalError> {
    if amount <= Decimal::ZERO {
        return Err(JournalError::NonPositiveAmount(amount));
    }

    let balance_before = account.current_balance;
    let balance_after = kind.apply(balance_before, amount);

    Ok(CustomerTransaction {
        id: TransactionId::new(),
        account_id: account.id,
        kind,
        amount,
        occurred_at: Utc::now(),
        balance_before,
        balance_after,
        payment_method: details.payment_method,
        sale_id: details.sale_id,
        sale_number: details.sale_number,
        notes: details.notes,
    })
}

/// Applies a built entry to its account, returning the updated account.
///
/// Updates `current_balance` from the entry snapshot, bumps the matching
/// lifetime total, increments the optimistic version, and refreshes
/// `updated_at`. The balance invariant is preserved by construction.
#[must_use]
pub fn apply_to_account(account: &CustomerAccount, entry: &CustomerTransaction) -> CustomerAccount {
    let mut updated = account.clone();
    updated.current_balance = entry.balance_after;
    match entry.kind {
        TransactionKind::Debit => updated.total_debt += entry.amount,
        TransactionKind::Credit => updated.total_paid += entry.amount,
    }
    updated.version += 1;
    updated.updated_at = entry.occurred_at;
    updated
}
