//! Storage layer with snapshot stores and ledger repositories.
//!
//! This crate provides:
//! - The `SnapshotStore` contract plus in-memory and JSON-file backends
//! - Repositories for accounts, the journal, payments, and statements
//! - A fire-and-forget broadcast channel for ledger events

pub mod events;
pub mod repositories;
pub mod snapshot;

pub use events::{EventBus, LedgerEvent};
pub use repositories::{
    AccountRepository, LedgerError, PaymentProcessor, StatementExporter, TransactionRepository,
};
pub use snapshot::{JsonFileStore, MemoryStore, SnapshotStore, StoreHandle};
