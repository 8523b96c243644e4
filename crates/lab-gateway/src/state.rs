use std::sync::Arc;
use std::time::Duration;

use blob_storage::BlobStorage;
use cat_api_client::CatApiClient;
use chrono::{DateTime, Utc};
use lookaside_cache::{CacheStore, Lookaside, MemoryStore, RedisStore};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::external::CatService;

/// Shared application state passed to all route handlers. Built once at
/// startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub cache: Lookaside,
    pub cats: Arc<CatService>,
    pub storage: BlobStorage,
    pub environment: String,
    pub max_upload_bytes: usize,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire already-connected backends together using the settings in
    /// `config`.
    pub fn new(
        store: Arc<dyn CacheStore>,
        client: CatApiClient,
        storage: BlobStorage,
        config: &Config,
    ) -> Self {
        let cache = Lookaside::new(store);
        let cats = CatService::new(client, cache.clone(), config.external_cache_ttl_secs);

        Self {
            cache,
            cats: Arc::new(cats),
            storage,
            environment: config.environment.clone(),
            max_upload_bytes: config.max_upload_bytes,
            started_at: Utc::now(),
        }
    }

    /// Connect the configured backends
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn CacheStore> = match &config.redis_url {
            Some(url) => Arc::new(RedisStore::connect(url).await?),
            None => {
                info!("REDIS_URL not set, using in-process cache");
                Arc::new(MemoryStore::new())
            }
        };

        let client = CatApiClient::with_urls(
            &config.cat_fact_url,
            &config.cat_image_url,
            Duration::from_secs(config.upstream_timeout_secs),
        )?;

        let storage = BlobStorage::from_backend(&config.storage)?;

        Ok(Self::new(store, client, storage, config))
    }
}
