use std::sync::Arc;

use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use tracing::{debug, info};

use crate::backend::StorageBackend;
use crate::error::{Result, StorageError};

/// Facade over a single object store container
#[derive(Clone)]
pub struct BlobStorage {
    store: Arc<dyn ObjectStore>,
}

impl BlobStorage {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn from_backend(backend: &StorageBackend) -> Result<Self> {
        Ok(Self::new(backend.build()?))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(object_store::memory::InMemory::new()))
    }

    /// Create or overwrite `filename`, returning the stored name
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> Result<String> {
        let path = object_path(filename)?;
        let size = content.len();
        self.store.put(&path, PutPayload::from(content)).await?;
        info!(filename, size, "Uploaded blob");
        Ok(path.to_string())
    }

    /// Every object name in the container, in backend order
    pub async fn list(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await?;
        debug!(count = names.len(), "Listed blobs");
        Ok(names)
    }

    /// Raw bytes of `filename`
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let path = object_path(filename)?;
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| not_found_as(e, filename))?;
        let bytes = result.bytes().await.map_err(|e| not_found_as(e, filename))?;
        Ok(bytes.to_vec())
    }

    /// Remove `filename`. Deleting a missing object fails with `NotFound` on
    /// every backend, so a second delete of the same name is an error.
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let path = object_path(filename)?;
        self.store
            .head(&path)
            .await
            .map_err(|e| not_found_as(e, filename))?;
        self.store
            .delete(&path)
            .await
            .map_err(|e| not_found_as(e, filename))?;
        info!(filename, "Deleted blob");
        Ok(())
    }
}

fn object_path(filename: &str) -> Result<Path> {
    let path = Path::parse(filename).map_err(|e| StorageError::InvalidName(e.to_string()))?;
    if path.as_ref().is_empty() {
        return Err(StorageError::InvalidName("file name is empty".into()));
    }
    Ok(path)
}

fn not_found_as(err: object_store::Error, filename: &str) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::NotFound(filename.to_string()),
        other => StorageError::Backend(other),
    }
}
