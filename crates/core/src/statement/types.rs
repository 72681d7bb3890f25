//! Account statement types.

use chrono::{DateTime, Utc};
use kasbon_shared::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::types::AccountStatus;
use crate::journal::types::{PaymentMethod, TransactionKind};

/// A single line on an account statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    /// Journal entry the line was built from.
    pub transaction_id: TransactionId,
    /// When the entry occurred.
    pub occurred_at: DateTime<Utc>,
    /// Debit (charge) or credit (payment).
    pub kind: TransactionKind,
    /// Positive amount; sign implied by `kind`.
    pub amount: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
    /// Payment method, for credit lines.
    pub payment_method: Option<PaymentMethod>,
    /// Sale number cross-reference, for debit lines.
    pub sale_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Statement totals over the included lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Sum of all debit (charge) lines.
    pub total_charges: Decimal,
    /// Sum of all credit (payment) lines.
    pub total_payments: Decimal,
    /// Number of lines.
    pub entry_count: usize,
}

/// A read-only statement for one customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatement {
    /// The account the statement describes.
    pub account_id: AccountId,
    /// Human-facing account number.
    pub account_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Lifecycle status at generation time.
    pub status: AccountStatus,
    /// Credit limit at generation time.
    pub credit_limit: Decimal,
    /// Balance at generation time.
    pub current_balance: Decimal,
    /// Credit utilization percentage; `None` when the limit is zero.
    pub utilization_pct: Option<Decimal>,
    /// Lines in chronological order with running balances.
    pub lines: Vec<StatementLine>,
    /// Totals over the included lines.
    pub totals: StatementTotals,
    /// When the statement was generated.
    pub generated_at: DateTime<Utc>,
}
