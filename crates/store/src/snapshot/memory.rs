//! In-memory snapshot store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::SnapshotStore;

/// Snapshot store backed by an in-process map.
///
/// Used by tests and by callers embedding the ledger without durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<serde_json::Value>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn read(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn replace(
        &self,
        collection: &str,
        rows: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections.insert(collection.to_string(), rows);
        Ok(())
    }
}
