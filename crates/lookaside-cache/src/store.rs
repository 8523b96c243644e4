use async_trait::async_trait;

use crate::error::{CacheError, Result};

/// A key/value store with optional per-key expiry.
///
/// Values are opaque strings; the [`Lookaside`](crate::Lookaside) layer owns
/// the JSON encoding. A `ttl_secs` of `None` means the entry never expires.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()>;
}

/// Zero-second expiries are rejected by Redis, so every backend rejects them.
pub(crate) fn check_ttl(ttl_secs: Option<u64>) -> Result<()> {
    match ttl_secs {
        Some(0) => Err(CacheError::InvalidTtl),
        _ => Ok(()),
    }
}
