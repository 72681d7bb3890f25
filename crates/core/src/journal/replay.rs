//! Journal replay verification.
//!
//! Replaying all of an account's entries in timestamp order from a zero
//! balance must reproduce the account's stored balance exactly. This is
//! the audit check for the snapshot chain.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::CustomerTransaction;

/// Replays journal entries in `occurred_at` order from a zero balance and
/// returns the final balance.
///
/// Verifies, per entry, that the amount is positive, that
/// `balance_before` continues the running chain, and that `balance_after`
/// matches the entry's own arithmetic.
///
/// # Errors
///
/// Returns the first broken-chain or mismatched-snapshot entry found.
pub fn replay(entries: &[CustomerTransaction]) -> Result<Decimal, JournalError> {
    let mut ordered: Vec<&CustomerTransaction> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.occurred_at);

    let mut running = Decimal::ZERO;

    for entry in ordered {
        if entry.amount <= Decimal::ZERO {
            return Err(JournalError::NonPositiveAmount(entry.amount));
        }
        if entry.balance_before != running {
            return Err(JournalError::ChainDiscontinuity {
                id: entry.id,
                expected: running,
                found: entry.balance_before,
            });
        }

        let expected_after = entry.kind.apply(entry.balance_before, entry.amount);
        if entry.balance_after != expected_after {
            return Err(JournalError::SnapshotMismatch {
                id: entry.id,
                expected: expected_after,
                found: entry.balance_after,
            });
        }

        running = entry.balance_after;
    }

    Ok(running)
}
