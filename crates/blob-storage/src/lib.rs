//! Blob Storage Facade
//!
//! Mirrors the container operations of the underlying object store
//! (upload, list, download, delete) and reports missing objects as
//! [`StorageError::NotFound`]. Objects move straight between absent and
//! present: no versioning, no soft delete.

mod backend;
mod error;
mod storage;

pub use backend::StorageBackend;
pub use error::{Result, StorageError};
pub use storage::BlobStorage;
