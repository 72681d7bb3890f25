//! Customer account types.

use chrono::{DateTime, Utc};
use kasbon_shared::{AccountId, TenantScope};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenancy::Scoped;

/// Whether the account belongs to a person or a business customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// A personal customer account.
    Individual,
    /// A corporate customer account.
    Corporate,
}

/// Lifecycle status of a customer account.
///
/// `Active` and `Suspended` are interchangeable through manual action;
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is open for charges and payments.
    Active,
    /// Account is manually suspended; reversible.
    Suspended,
    /// Account is closed; terminal state.
    Closed,
}

impl AccountStatus {
    /// Returns true if this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// A customer credit account.
///
/// Invariant: `current_balance == total_debt - total_paid` at all times.
/// `total_debt` and `total_paid` are lifetime sums and never decrease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAccount {
    /// Stable identifier, immutable.
    pub id: AccountId,
    /// Human-facing account number, generated at creation, immutable.
    pub account_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Individual or corporate.
    pub account_type: AccountType,
    /// Contact phone number, required.
    pub phone: String,
    /// Contact email, optional.
    pub email: Option<String>,
    /// Postal address, optional.
    pub address: Option<String>,
    /// Maximum balance the account may reach under normal charge flow.
    /// Enforced by callers at the point of sale, not by the ledger.
    pub credit_limit: Decimal,
    /// Amount currently owed. May go negative on overpayment.
    pub current_balance: Decimal,
    /// Lifetime sum of all debit (charge) transactions.
    pub total_debt: Decimal,
    /// Lifetime sum of all credit (payment) transactions.
    pub total_paid: Decimal,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// True for accounts auto-derived from staff records; exempt from
    /// deletion.
    pub is_employee: bool,
    /// Owning admin, stamped at creation.
    pub admin_id: Option<String>,
    /// Owning branch, stamped at creation.
    pub branch_id: Option<String>,
    /// Optimistic-concurrency counter, bumped on every write.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CustomerAccount {
    /// Returns the credit utilization percentage, or `None` when the
    /// credit limit is zero.
    #[must_use]
    pub fn utilization(&self) -> Option<Decimal> {
        if self.credit_limit.is_zero() {
            return None;
        }
        Some(self.current_balance / self.credit_limit * Decimal::ONE_HUNDRED)
    }

    /// Returns true if the balance invariant holds.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.current_balance == self.total_debt - self.total_paid
    }
}

impl Scoped for CustomerAccount {
    fn record_id(&self) -> Uuid {
        self.id.into_inner()
    }

    fn owner_admin(&self) -> Option<&str> {
        self.admin_id.as_deref()
    }

    fn owner_branch(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }

    fn assign_scope(&mut self, scope: &TenantScope) {
        self.admin_id = Some(scope.admin_id.clone());
        self.branch_id = Some(scope.branch_id.clone());
    }
}

/// Input for creating a customer account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Customer display name, required.
    pub customer_name: String,
    /// Individual or corporate.
    pub account_type: AccountType,
    /// Contact phone number, required.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Credit limit, must be non-negative.
    pub credit_limit: Decimal,
    /// True for accounts derived from staff records.
    pub is_employee: bool,
}

/// Input for updating an account's profile.
///
/// Balance fields are deliberately absent; they change only through the
/// payment processor.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New customer name.
    pub customer_name: Option<String>,
    /// New account type.
    pub account_type: Option<AccountType>,
    /// New phone number.
    pub phone: Option<String>,
    /// New email (`Some(None)` clears it).
    pub email: Option<Option<String>>,
    /// New address (`Some(None)` clears it).
    pub address: Option<Option<String>>,
    /// New credit limit; may never be set below the current balance.
    pub credit_limit: Option<Decimal>,
}

/// Generates a human-facing account number from the account id.
///
/// Format: `CA-` followed by the first 8 hex digits of the id, uppercased.
#[must_use]
pub fn generate_account_number(id: AccountId) -> String {
    let hex = id.into_inner().simple().to_string();
    format!("CA-{}", hex[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal, limit: Decimal) -> CustomerAccount {
        let id = AccountId::new();
        CustomerAccount {
            id,
            account_number: generate_account_number(id),
            customer_name: "Budi Santoso".to_string(),
            account_type: AccountType::Individual,
            phone: "0812-0000-0000".to_string(),
            email: None,
            address: None,
            credit_limit: limit,
            current_balance: balance,
            total_debt: balance,
            total_paid: Decimal::ZERO,
            status: AccountStatus::Active,
            is_employee: false,
            admin_id: None,
            branch_id: None,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_utilization() {
        let account = account(dec!(1200), dec!(5000));
        assert_eq!(account.utilization(), Some(dec!(24)));
    }

    #[test]
    fn test_utilization_undefined_for_zero_limit() {
        let account = account(dec!(100), Decimal::ZERO);
        assert_eq!(account.utilization(), None);
    }

    #[test]
    fn test_invariant_holds() {
        let mut account = account(dec!(700), dec!(5000));
        account.total_debt = dec!(1200);
        account.total_paid = dec!(500);
        assert!(account.invariant_holds());

        account.total_paid = dec!(400);
        assert!(!account.invariant_holds());
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(AccountStatus::Closed.is_terminal());
        assert!(!AccountStatus::Active.is_terminal());
        assert!(!AccountStatus::Suspended.is_terminal());
    }

    #[test]
    fn test_account_number_format() {
        let number = generate_account_number(AccountId::new());
        assert!(number.starts_with("CA-"));
        assert_eq!(number.len(), 11);
        assert!(number[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_account_number_is_deterministic_per_id() {
        let id = AccountId::new();
        assert_eq!(generate_account_number(id), generate_account_number(id));
    }
}
