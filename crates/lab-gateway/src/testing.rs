//! Cache doubles shared by the gateway's unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use lookaside_cache::{CacheError, CacheStore, MemoryStore};

/// Every operation fails, as if the backend were unreachable
pub struct DownStore;

#[async_trait]
impl CacheStore for DownStore {
    async fn get(&self, _key: &str) -> lookaside_cache::Result<Option<String>> {
        Err(CacheError::InvalidTtl)
    }

    async fn set(
        &self,
        _key: &str,
        _value: String,
        _ttl: Option<u64>,
    ) -> lookaside_cache::Result<()> {
        Err(CacheError::InvalidTtl)
    }
}

/// In-memory store that remembers the key and TTL of every write
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, Option<u64>)>>,
}

impl RecordingStore {
    pub fn writes(&self) -> Vec<(String, Option<u64>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn ttl_of(&self, key: &str) -> Option<Option<u64>> {
        self.writes()
            .into_iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, ttl)| ttl)
    }
}

#[async_trait]
impl CacheStore for RecordingStore {
    async fn get(&self, key: &str) -> lookaside_cache::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_secs: Option<u64>,
    ) -> lookaside_cache::Result<()> {
        self.writes.lock().unwrap().push((key.to_string(), ttl_secs));
        self.inner.set(key, value, ttl_secs).await
    }
}
