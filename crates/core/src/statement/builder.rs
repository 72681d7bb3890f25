//! Statement building.

use chrono::Utc;
use rust_decimal::Decimal;

use super::types::{AccountStatement, StatementLine, StatementTotals};
use crate::account::types::CustomerAccount;
use crate::journal::types::{CustomerTransaction, TransactionKind};

/// Builds a read-only statement for an account from its journal entries.
///
/// Entries are sorted chronologically and rendered with running balances
/// taken from the entries' own snapshots. Never mutates its inputs.
#[must_use]
pub fn build_statement(
    account: &CustomerAccount,
    entries: &[CustomerTransaction],
) -> AccountStatement {
    let mut ordered: Vec<&CustomerTransaction> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.occurred_at);

    let mut total_charges = Decimal::ZERO;
    let mut total_payments = Decimal::ZERO;

    let lines: Vec<StatementLine> = ordered
        .into_iter()
        .map(|entry| {
            match entry.kind {
                TransactionKind::Debit => total_charges += entry.amount,
                TransactionKind::Credit => total_payments += entry.amount,
            }
            StatementLine {
                transaction_id: entry.id,
                occurred_at: entry.occurred_at,
                kind: entry.kind,
                amount: entry.amount,
                running_balance: entry.balance_after,
                payment_method: entry.payment_method,
                sale_number: entry.sale_number.clone(),
                notes: entry.notes.clone(),
            }
        })
        .collect();

    let totals = StatementTotals {
        total_charges,
        total_payments,
        entry_count: lines.len(),
    };

    AccountStatement {
        account_id: account.id,
        account_number: account.account_number.clone(),
        customer_name: account.customer_name.clone(),
        status: account.status,
        credit_limit: account.credit_limit,
        current_balance: account.current_balance,
        utilization_pct: account.utilization(),
        lines,
        totals,
        generated_at: Utc::now(),
    }
}
