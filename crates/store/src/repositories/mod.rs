//! Repositories over the snapshot store.
//!
//! Every operation takes the caller's [`kasbon_shared::TenantScope`]
//! explicitly. There is no ambient session state; a repository call made
//! without a scope cannot exist by construction.

pub mod account;
pub mod error;
pub mod payment;
pub mod statement;
pub mod transaction;

pub use account::AccountRepository;
pub use error::LedgerError;
pub use payment::PaymentProcessor;
pub use statement::StatementExporter;
pub use transaction::TransactionRepository;

/// Collection name for customer accounts.
pub const ACCOUNTS_COLLECTION: &str = "customer_accounts";

/// Collection name for journal entries.
pub const TRANSACTIONS_COLLECTION: &str = "customer_transactions";
