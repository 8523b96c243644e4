use std::path::PathBuf;
use std::sync::Arc;

use object_store::azure::MicrosoftAzureBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use tracing::info;

use crate::error::Result;

/// Where blobs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Azure Blob Storage container authenticated with an account key
    Azure {
        account: String,
        access_key: String,
        container: String,
    },
    /// Directory on the local filesystem, created if missing
    Local { root: PathBuf },
    /// Process memory; contents vanish on restart
    Memory,
}

impl StorageBackend {
    pub(crate) fn build(&self) -> Result<Arc<dyn ObjectStore>> {
        match self {
            Self::Azure {
                account,
                access_key,
                container,
            } => {
                info!(account = %account, container = %container, "Using Azure Blob Storage");
                let store = MicrosoftAzureBuilder::new()
                    .with_account(account)
                    .with_access_key(access_key)
                    .with_container_name(container)
                    .build()?;
                Ok(Arc::new(store))
            }
            Self::Local { root } => {
                info!(root = ?root, "Using local filesystem storage");
                std::fs::create_dir_all(root)?;
                Ok(Arc::new(LocalFileSystem::new_with_prefix(root)?))
            }
            Self::Memory => {
                info!("Using in-memory storage");
                Ok(Arc::new(InMemory::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_backend_creates_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested/blobs");
        StorageBackend::Local { root: root.clone() }.build().unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_memory_backend_builds() {
        assert!(StorageBackend::Memory.build().is_ok());
    }
}
