//! Payment processor: the only write path for customer balances.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use kasbon_core::journal::{
    CustomerTransaction, EntryDetails, TransactionKind, apply_to_account, build_entry,
};
use kasbon_shared::config::LedgerConfig;
use kasbon_shared::{AccountId, TenantScope};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::account::AccountRepository;
use super::error::LedgerError;
use super::TRANSACTIONS_COLLECTION;
use crate::events::{EventBus, LedgerEvent};
use crate::snapshot::StoreHandle;

/// Applies charges and payments to customer accounts.
///
/// Each application appends a journal entry and updates the account as a
/// pair. Writers to the same account are serialized through a per-account
/// mutex; an optimistic version check at write-back guards against other
/// processor instances sharing the store, with a bounded retry on
/// conflict.
#[derive(Clone)]
pub struct PaymentProcessor {
    handle: StoreHandle,
    accounts: AccountRepository,
    locks: Arc<DashMap<AccountId, Arc<Mutex<()>>>>,
    events: EventBus,
    max_retries: u32,
    retry_backoff: Duration,
}

impl PaymentProcessor {
    /// Creates a processor with default retry settings.
    #[must_use]
    pub fn new(handle: StoreHandle, events: EventBus) -> Self {
        Self::with_config(handle, events, &LedgerConfig::default())
    }

    /// Creates a processor with retry settings from configuration.
    #[must_use]
    pub fn with_config(handle: StoreHandle, events: EventBus, config: &LedgerConfig) -> Self {
        let accounts = AccountRepository::new(handle.clone());
        Self {
            handle,
            accounts,
            locks: Arc::new(DashMap::new()),
            events,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Records a payment (credit) against an account.
    ///
    /// Overpayment is accepted; the balance may go negative.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for invisible accounts, a validation error for a
    /// non-positive amount, and `ConcurrencyConflict` if retries are
    /// exhausted.
    pub async fn apply_payment(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
        amount: Decimal,
        details: EntryDetails,
    ) -> Result<CustomerTransaction, LedgerError> {
        self.apply(scope, account_id, TransactionKind::Credit, amount, details)
            .await
    }

    /// Records a charge (debit) against an account.
    ///
    /// Credit limits are a caller policy; the processor applies any
    /// positive charge.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for invisible accounts, a validation error for a
    /// non-positive amount, and `ConcurrencyConflict` if retries are
    /// exhausted.
    pub async fn apply_charge(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
        amount: Decimal,
        details: EntryDetails,
    ) -> Result<CustomerTransaction, LedgerError> {
        self.apply(scope, account_id, TransactionKind::Debit, amount, details)
            .await
    }

    async fn apply(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
        kind: TransactionKind,
        amount: Decimal,
        details: EntryDetails,
    ) -> Result<CustomerTransaction, LedgerError> {
        let lock = self.account_lock(account_id);

        let mut attempt = 0;
        loop {
            let guard = lock.lock().await;

            match self
                .apply_once(scope, account_id, kind, amount, details.clone())
                .await
            {
                Ok(entry) => {
                    self.events.emit(LedgerEvent {
                        account_id,
                        kind,
                        amount,
                        balance_after: entry.balance_after,
                    });
                    return Ok(entry);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        account_id = %account_id,
                        attempt,
                        "Concurrent modification, retrying"
                    );
                    drop(guard);
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: build the entry, append it, then update the account.
    /// If the account write loses the version race, the appended entry is
    /// removed again so no partial application survives.
    async fn apply_once(
        &self,
        scope: &TenantScope,
        account_id: AccountId,
        kind: TransactionKind,
        amount: Decimal,
        details: EntryDetails,
    ) -> Result<CustomerTransaction, LedgerError> {
        let account = self.accounts.find(scope, account_id).await?;

        let entry = build_entry(&account, kind, amount, details)?;
        let updated = apply_to_account(&account, &entry);

        self.append_entry(&entry).await?;

        if let Err(err) = self.accounts.write_back(account.version, updated).await {
            self.remove_entry(&entry).await?;
            return Err(err);
        }

        Ok(entry)
    }

    async fn append_entry(&self, entry: &CustomerTransaction) -> Result<(), LedgerError> {
        let _guard = self.handle.lock(TRANSACTIONS_COLLECTION).await;
        let mut entries: Vec<CustomerTransaction> =
            self.handle.read_all(TRANSACTIONS_COLLECTION).await?;
        entries.push(entry.clone());
        self.handle
            .write_all(TRANSACTIONS_COLLECTION, &entries)
            .await?;
        Ok(())
    }

    async fn remove_entry(&self, entry: &CustomerTransaction) -> Result<(), LedgerError> {
        let _guard = self.handle.lock(TRANSACTIONS_COLLECTION).await;
        let mut entries: Vec<CustomerTransaction> =
            self.handle.read_all(TRANSACTIONS_COLLECTION).await?;
        entries.retain(|stored| stored.id != entry.id);
        self.handle
            .write_all(TRANSACTIONS_COLLECTION, &entries)
            .await?;
        Ok(())
    }

    fn account_lock(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
