use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use crate::error::Result;
use crate::store::{check_ttl, CacheStore};

/// Redis-backed store. Expiry is delegated to Redis via `SET EX`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis. The connection manager reconnects on its own after
    /// transient failures.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        info!("Connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl_secs: Option<u64>) -> Result<()> {
        check_ttl(ttl_secs)?;
        let mut conn = self.conn.clone();
        match ttl_secs {
            Some(secs) => conn.set_ex::<_, _, ()>(key, value, secs).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }
}
