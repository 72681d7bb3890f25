//! Transaction repository for journal reads and audit checks.

use kasbon_core::journal::{CustomerTransaction, replay};
use kasbon_shared::{AccountId, TenantScope};
use rust_decimal::Decimal;

use super::account::AccountRepository;
use super::error::LedgerError;
use super::TRANSACTIONS_COLLECTION;
use crate::snapshot::StoreHandle;

/// Read-only repository over the append-only journal.
///
/// Entries inherit their account's scope: a caller who can see the
/// account can see its whole journal, and a caller who cannot see the
/// account gets `NotFound` before any entry is read.
#[derive(Clone)]
pub struct TransactionRepository {
    handle: StoreHandle,
    accounts: AccountRepository,
}

impl TransactionRepository {
    /// Creates a repository sharing the given store handle.
    #[must_use]
    pub fn new(handle: StoreHandle) -> Self {
        let accounts = AccountRepository::new(handle.clone());
        Self { handle, accounts }
    }

    /// Lists an account's journal entries in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account is not visible to the caller.
    pub async fn list_for_account(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
    ) -> Result<Vec<CustomerTransaction>, LedgerError> {
        self.accounts.find(scope, account_id).await?;

        let entries: Vec<CustomerTransaction> =
            self.handle.read_all(TRANSACTIONS_COLLECTION).await?;
        let mut entries: Vec<CustomerTransaction> = entries
            .into_iter()
            .filter(|entry| entry.account_id == account_id)
            .collect();
        entries.sort_by_key(|entry| entry.occurred_at);
        Ok(entries)
    }

    /// Replays an account's journal from zero and checks the result
    /// against the stored balance.
    ///
    /// Returns the replayed balance.
    ///
    /// # Errors
    ///
    /// Returns a journal error if the chain is broken, and
    /// `ReplayMismatch` if the replayed balance disagrees with the
    /// account.
    pub async fn verify_replay(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
    ) -> Result<Decimal, LedgerError> {
        let account = self.accounts.find(scope, account_id).await?;
        let entries = self.list_for_account(scope, account_id).await?;

        let replayed = replay(&entries)?;
        if replayed != account.current_balance {
            tracing::warn!(
                account_id = %account_id,
                stored = %account.current_balance,
                replayed = %replayed,
                "Journal replay disagrees with stored balance"
            );
            return Err(LedgerError::ReplayMismatch {
                id: account_id,
                stored: account.current_balance,
                replayed,
            });
        }
        Ok(replayed)
    }
}
