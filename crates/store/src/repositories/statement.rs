//! Statement exporter.

use kasbon_core::statement::{AccountStatement, build_statement};
use kasbon_shared::{AccountId, TenantScope};

use super::account::AccountRepository;
use super::error::LedgerError;
use super::transaction::TransactionRepository;
use crate::snapshot::StoreHandle;

/// Builds read-only statements for accounts visible to the caller.
#[derive(Clone)]
pub struct StatementExporter {
    accounts: AccountRepository,
    transactions: TransactionRepository,
}

impl StatementExporter {
    /// Creates an exporter sharing the given store handle.
    #[must_use]
    pub fn new(handle: StoreHandle) -> Self {
        Self {
            accounts: AccountRepository::new(handle.clone()),
            transactions: TransactionRepository::new(handle),
        }
    }

    /// Exports a statement for one account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account is not visible to the caller.
    pub async fn export(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
    ) -> Result<AccountStatement, LedgerError> {
        let account = self.accounts.find(scope, account_id).await?;
        let entries = self
            .transactions
            .list_for_account(scope, account_id)
            .await?;
        Ok(build_statement(&account, &entries))
    }

    /// Exports statements for every account visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either collection cannot be read.
    pub async fn export_all(
        &self,
        scope: &TenantScope,
    ) -> Result<Vec<AccountStatement>, LedgerError> {
        let accounts = self.accounts.list(scope).await?;

        let mut statements = Vec::with_capacity(accounts.len());
        for account in accounts {
            let entries = self
                .transactions
                .list_for_account(scope, account.id)
                .await?;
            statements.push(build_statement(&account, &entries));
        }
        Ok(statements)
    }
}
