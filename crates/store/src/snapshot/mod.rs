//! Snapshot persistence contract.
//!
//! The ledger persists through whole-collection snapshots: a store reads
//! and replaces complete collections, never individual rows. Because every
//! write is a read-modify-write of a full collection, mutations go through
//! a [`StoreHandle`] that serializes writers per collection.

pub mod error;
pub mod json_file;
pub mod memory;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Whole-collection snapshot storage.
///
/// Rows travel as raw JSON values; [`StoreHandle`] decodes and encodes
/// them through serde.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads every row of a collection. A collection that was never
    /// written reads as empty.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing medium cannot be read.
    async fn read(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError>;

    /// Replaces a collection's contents wholesale.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing medium cannot be written.
    async fn replace(
        &self,
        collection: &str,
        rows: Vec<serde_json::Value>,
    ) -> Result<(), StoreError>;
}

/// Shared handle over a snapshot store.
///
/// Carries one write lock per collection so that concurrent
/// read-modify-write cycles on the same collection cannot lose updates.
/// Every repository touching the same data must be built from the same
/// handle.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<dyn SnapshotStore>,
    write_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl StoreHandle {
    /// Wraps a snapshot store.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            write_locks: Arc::new(DashMap::new()),
        }
    }

    /// Reads and decodes every row of a collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error on read failure or when a row does not
    /// decode.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self.store.read(collection).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// Encodes and writes a full collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error on encode or write failure.
    pub async fn write_all<T: Serialize>(
        &self,
        collection: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let rows = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.store.replace(collection, rows).await
    }

    /// Acquires the write lock for a collection. Hold the guard across a
    /// full read-modify-write cycle.
    pub async fn lock(&self, collection: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .write_locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
