use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;

use crate::error::Result;
use crate::store::{check_ttl, CacheStore};

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    value: Arc<str>,
    ttl: Option<Duration>,
}

/// Expiry policy that reads the TTL off each entry, so `set` without a TTL
/// replaces an expiring entry with a permanent one.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        entry.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        entry.ttl
    }
}

/// In-process store backed by moka, used when no Redis URL is configured.
#[derive(Clone)]
pub struct MemoryStore {
    cache: Cache<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value.to_string()))
    }

    async fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()> {
        check_ttl(ttl_secs)?;
        let entry = Entry {
            value: value.into(),
            ttl: ttl_secs.map(Duration::from_secs),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }
}
