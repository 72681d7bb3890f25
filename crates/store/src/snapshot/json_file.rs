//! JSON-file snapshot store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::StoreError;
use super::SnapshotStore;

/// Snapshot store that keeps one `{collection}.json` file per collection
/// under a data directory.
///
/// Writes go through a temporary file and an atomic rename so a crash
/// mid-write never leaves a truncated collection behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn read(&self, collection: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        let path = self.collection_path(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn replace(
        &self,
        collection: &str,
        rows: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));

        let bytes = serde_json::to_vec_pretty(&rows)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
