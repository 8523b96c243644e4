use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::store::CacheStore;

/// JSON-encoding front for a [`CacheStore`].
#[derive(Clone)]
pub struct Lookaside {
    store: Arc<dyn CacheStore>,
}

impl Lookaside {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Return the cached value for `key`, or call `fetch` and cache its result.
    ///
    /// Store read and write failures are logged at error level, which is what
    /// the error-reporting layer picks up, and never surface: a failed read
    /// counts as a miss, a failed write still returns the fetched value.
    /// `fetch` runs at most once and its error is returned unchanged without
    /// touching the store. There is no single-flight, so concurrent misses on
    /// the same key each call `fetch`.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_secs: Option<u64>,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
            },
            Ok(None) => debug!(key, "Cache miss"),
            Err(e) => error!(key, error = %e, "Cache read failed, treating as miss"),
        }

        let value = fetch().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.store.set(key, raw, ttl_secs).await {
                    error!(key, error = %e, "Cache write failed");
                }
            }
            Err(e) => error!(key, error = %e, "Could not encode value for cache"),
        }

        Ok(value)
    }

    /// Read and decode `key`. Unlike [`get_or_fetch`](Self::get_or_fetch),
    /// store errors are returned to the caller.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and write `value` under `key`, returning store errors.
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw, ttl_secs).await
    }
}
