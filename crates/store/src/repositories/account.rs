//! Account repository for customer account lifecycle operations.

use std::time::Duration;

use chrono::Utc;
use kasbon_core::account::{
    AccountError, AccountStatus, CreateAccountInput, CustomerAccount, UpdateProfileInput,
    generate_account_number, validate_create, validate_delete, validate_profile_update,
    validate_status_transition,
};
use kasbon_core::tenancy::OwnershipFilter;
use kasbon_shared::config::LedgerConfig;
use kasbon_shared::{AccountId, TenantScope};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::ACCOUNTS_COLLECTION;
use crate::snapshot::StoreHandle;

/// Repository for customer account CRUD and lifecycle transitions.
///
/// All reads pass through the ownership filter; all writes stamp the
/// caller's scope onto the record. Balance fields are never touched here;
/// they change only through the payment processor.
#[derive(Clone)]
pub struct AccountRepository {
    handle: StoreHandle,
    filter: OwnershipFilter,
    max_retries: u32,
    retry_backoff: Duration,
}

impl AccountRepository {
    /// Creates a repository with the default branch-scoped filter and
    /// default retry settings.
    #[must_use]
    pub fn new(handle: StoreHandle) -> Self {
        Self::with_config(handle, &LedgerConfig::default())
    }

    /// Creates a repository with retry settings from configuration.
    #[must_use]
    pub fn with_config(handle: StoreHandle, config: &LedgerConfig) -> Self {
        Self {
            handle,
            filter: OwnershipFilter::branch_scoped(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Creates a new account stamped with the caller's scope.
    ///
    /// The generated account number is checked against the stored
    /// collection, so it is unique across the whole store.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input, or a storage error.
    pub async fn create(
        &self,
        scope: &TenantScope,
        input: CreateAccountInput,
    ) -> Result<CustomerAccount, LedgerError> {
        validate_create(&input)?;

        let _guard = self.handle.lock(ACCOUNTS_COLLECTION).await;
        let mut accounts: Vec<CustomerAccount> =
            self.handle.read_all(ACCOUNTS_COLLECTION).await?;

        let (id, account_number) = Self::fresh_identity(&accounts);
        let now = Utc::now();
        let mut account = CustomerAccount {
            id,
            account_number,
            customer_name: input.customer_name,
            account_type: input.account_type,
            phone: input.phone,
            email: input.email,
            address: input.address,
            credit_limit: input.credit_limit,
            current_balance: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            status: AccountStatus::Active,
            is_employee: input.is_employee,
            admin_id: None,
            branch_id: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        OwnershipFilter::tag(&mut account, scope);

        accounts.push(account.clone());
        self.handle.write_all(ACCOUNTS_COLLECTION, &accounts).await?;

        tracing::info!(account_id = %account.id, scope = %scope, "Account created");
        Ok(account)
    }

    /// Lists the accounts visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read.
    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<CustomerAccount>, LedgerError> {
        let accounts: Vec<CustomerAccount> = self.handle.read_all(ACCOUNTS_COLLECTION).await?;
        Ok(self.filter.visible(Some(scope), accounts))
    }

    /// Finds one account visible to the caller.
    ///
    /// An account owned by a different scope reads as not found rather
    /// than leaking its existence.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no visible account has the id.
    pub async fn find(
        &self,
        scope: &TenantScope,
        id: AccountId,
    ) -> Result<CustomerAccount, LedgerError> {
        let accounts: Vec<CustomerAccount> = self.handle.read_all(ACCOUNTS_COLLECTION).await?;
        accounts
            .into_iter()
            .find(|account| account.id == id && self.filter.is_visible(Some(scope), account))
            .ok_or_else(|| AccountError::NotFound(id).into())
    }

    /// Updates an account's profile fields.
    ///
    /// The record is re-stamped with the caller's scope, so a legacy
    /// unscoped account becomes owned by its first editor.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for invisible accounts, validation or invariant
    /// errors for bad input, and `ConcurrencyConflict` if another writer
    /// kept changing the account across every retry.
    pub async fn update_profile(
        &self,
        scope: &TenantScope,
        id: AccountId,
        input: UpdateProfileInput,
    ) -> Result<CustomerAccount, LedgerError> {
        let mut attempt = 0;
        loop {
            match self.try_update_profile(scope, id, input.clone()).await {
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        account_id = %id,
                        attempt,
                        "Concurrent modification, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                result => return result,
            }
        }
    }

    /// One update attempt against the account's current version.
    async fn try_update_profile(
        &self,
        scope: &TenantScope,
        id: AccountId,
        input: UpdateProfileInput,
    ) -> Result<CustomerAccount, LedgerError> {
        let current = self.find(scope, id).await?;
        validate_profile_update(&current, &input)?;

        let mut updated = current.clone();
        if let Some(name) = input.customer_name {
            updated.customer_name = name;
        }
        if let Some(account_type) = input.account_type {
            updated.account_type = account_type;
        }
        if let Some(phone) = input.phone {
            updated.phone = phone;
        }
        if let Some(email) = input.email {
            updated.email = email;
        }
        if let Some(address) = input.address {
            updated.address = address;
        }
        if let Some(limit) = input.credit_limit {
            updated.credit_limit = limit;
        }
        OwnershipFilter::tag(&mut updated, scope);
        updated.version += 1;
        updated.updated_at = Utc::now();

        self.write_back(current.version, updated).await
    }

    /// Suspends an account. Idempotent for already-suspended accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountClosed` for closed accounts and `NotFound` for
    /// invisible ones.
    pub async fn suspend(
        &self,
        scope: &TenantScope,
        id: AccountId,
    ) -> Result<CustomerAccount, LedgerError> {
        self.transition(scope, id, AccountStatus::Suspended).await
    }

    /// Re-activates a suspended account. Idempotent for active accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountClosed` for closed accounts and `NotFound` for
    /// invisible ones.
    pub async fn activate(
        &self,
        scope: &TenantScope,
        id: AccountId,
    ) -> Result<CustomerAccount, LedgerError> {
        self.transition(scope, id, AccountStatus::Active).await
    }

    /// Closes an account permanently.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for invisible accounts.
    pub async fn close(
        &self,
        scope: &TenantScope,
        id: AccountId,
    ) -> Result<CustomerAccount, LedgerError> {
        self.transition(scope, id, AccountStatus::Closed).await
    }

    /// Physically deletes an account the caller's scope owns.
    ///
    /// Historical transactions are kept; they remain addressable by
    /// account id for audit.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOutstanding` or `EmployeeAccount` when the account
    /// cannot be deleted, `PermissionDenied` when it belongs to a
    /// different scope, and `NotFound` when no such account exists.
    pub async fn delete(&self, scope: &TenantScope, id: AccountId) -> Result<(), LedgerError> {
        let _guard = self.handle.lock(ACCOUNTS_COLLECTION).await;
        let mut accounts: Vec<CustomerAccount> =
            self.handle.read_all(ACCOUNTS_COLLECTION).await?;

        // Ownership first: a precondition error on a foreign account would
        // leak its existence and balance.
        let removed = OwnershipFilter::remove_owned(&mut accounts, id.into_inner(), scope)?;
        validate_delete(&removed)?;
        self.handle.write_all(ACCOUNTS_COLLECTION, &accounts).await?;

        tracing::info!(account_id = %removed.id, scope = %scope, "Account deleted");
        Ok(())
    }

    async fn transition(
        &self,
        scope: &TenantScope,
        id: AccountId,
        target: AccountStatus,
    ) -> Result<CustomerAccount, LedgerError> {
        let mut attempt = 0;
        loop {
            match self.try_transition(scope, id, target).await {
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        account_id = %id,
                        attempt,
                        "Concurrent modification, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                result => return result,
            }
        }
    }

    /// One transition attempt against the account's current version.
    async fn try_transition(
        &self,
        scope: &TenantScope,
        id: AccountId,
        target: AccountStatus,
    ) -> Result<CustomerAccount, LedgerError> {
        let current = self.find(scope, id).await?;
        validate_status_transition(&current, target)?;

        if current.status == target {
            return Ok(current);
        }

        let mut updated = current.clone();
        updated.status = target;
        updated.version += 1;
        updated.updated_at = Utc::now();

        self.write_back(current.version, updated).await
    }

    /// Draws a fresh id whose derived account number is not already taken.
    ///
    /// Callers must hold the accounts collection lock so the number stays
    /// unique through the write.
    fn fresh_identity(accounts: &[CustomerAccount]) -> (AccountId, String) {
        loop {
            let id = AccountId::new();
            let number = generate_account_number(id);
            if !accounts
                .iter()
                .any(|account| account.account_number == number)
            {
                return (id, number);
            }
        }
    }

    /// Writes an account back, failing if its stored version no longer
    /// matches `expected_version`.
    pub(crate) async fn write_back(
        &self,
        expected_version: i64,
        updated: CustomerAccount,
    ) -> Result<CustomerAccount, LedgerError> {
        let _guard = self.handle.lock(ACCOUNTS_COLLECTION).await;
        let mut accounts: Vec<CustomerAccount> =
            self.handle.read_all(ACCOUNTS_COLLECTION).await?;

        let slot = accounts
            .iter_mut()
            .find(|account| account.id == updated.id)
            .ok_or(AccountError::NotFound(updated.id))?;

        if slot.version != expected_version {
            return Err(LedgerError::ConcurrencyConflict(updated.id));
        }

        *slot = updated.clone();
        self.handle.write_all(ACCOUNTS_COLLECTION, &accounts).await?;
        Ok(updated)
    }
}
