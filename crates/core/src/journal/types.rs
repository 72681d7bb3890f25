//! Journal entry types.

use chrono::{DateTime, Utc};
use kasbon_shared::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entry kind: either a charge (debit) or a payment (credit).
///
/// Debits increase what the customer owes; credits decrease it. The amount
/// is always stored positive, with the sign implied by the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// A sale on account; increases the balance.
    Debit,
    /// A payment; decreases the balance.
    Credit,
}

impl TransactionKind {
    /// Applies an amount to a balance, returning the new balance.
    ///
    /// This is the single authority for balance deltas.
    #[must_use]
    pub fn apply(&self, balance_before: Decimal, amount: Decimal) -> Decimal {
        match self {
            Self::Debit => balance_before + amount,
            Self::Credit => balance_before - amount,
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash at the register.
    Cash,
    /// Debit/credit card.
    Card,
    /// QRIS code scan.
    Qris,
    /// Bank transfer.
    Transfer,
}

/// An immutable journal entry against a customer account.
///
/// Invariant: `balance_after == kind.apply(balance_before, amount)` and
/// `amount > 0`. Entries inherit the owning account's tenant scope and are
/// never independently re-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTransaction {
    /// Stable identifier.
    pub id: TransactionId,
    /// The account this entry belongs to.
    pub account_id: AccountId,
    /// Debit (charge) or credit (payment).
    pub kind: TransactionKind,
    /// Positive amount; sign is implied by `kind`.
    pub amount: Decimal,
    /// Set at append time, never edited.
    pub occurred_at: DateTime<Utc>,
    /// The account's balance immediately before this entry.
    pub balance_before: Decimal,
    /// The account's balance immediately after this entry.
    pub balance_after: Decimal,
    /// Payment method, for credit entries.
    pub payment_method: Option<PaymentMethod>,
    /// Cross-reference to the sale that produced a debit entry.
    pub sale_id: Option<Uuid>,
    /// Human-facing sale number for the cross-reference.
    pub sale_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Optional metadata carried by a journal entry.
#[derive(Debug, Clone, Default)]
pub struct EntryDetails {
    /// Payment method, for credit entries.
    pub payment_method: Option<PaymentMethod>,
    /// Cross-reference to the originating sale, for debit entries.
    pub sale_id: Option<Uuid>,
    /// Human-facing sale number.
    pub sale_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}
