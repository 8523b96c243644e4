use std::env;
use std::path::PathBuf;

use blob_storage::StorageBackend;
use cat_api_client::{DEFAULT_FACT_URL, DEFAULT_IMAGE_URL, DEFAULT_TIMEOUT_SECS};

use crate::error::{GatewayError, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    /// Absent means the in-process cache store is used
    pub redis_url: Option<String>,
    /// Absent means startup migrations are skipped
    pub database_url: Option<String>,
    pub sentry_dsn: Option<String>,
    pub cat_fact_url: String,
    pub cat_image_url: String,
    pub upstream_timeout_secs: u64,
    /// TTL for cached upstream responses; absent means no expiry
    pub external_cache_ttl_secs: Option<u64>,
    pub storage: StorageBackend,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000);

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let upstream_timeout_secs = var("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let external_cache_ttl_secs = match var("EXTERNAL_CACHE_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(GatewayError::Config(format!(
                        "EXTERNAL_CACHE_TTL_SECS must be a positive integer, got {raw:?}"
                    )))
                }
                Ok(secs) => Some(secs),
            },
            None => None,
        };

        let max_upload_bytes = var("MAX_UPLOAD_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let storage = match (
            var("AZURE_STORAGE_ACCOUNT"),
            var("AZURE_STORAGE_ACCESS_KEY"),
            var("AZURE_STORAGE_CONTAINER"),
        ) {
            (Some(account), Some(access_key), Some(container)) => StorageBackend::Azure {
                account,
                access_key,
                container,
            },
            (None, None, None) => match var("LOCAL_STORAGE_DIR") {
                Some(dir) => StorageBackend::Local {
                    root: PathBuf::from(dir),
                },
                None => StorageBackend::Memory,
            },
            _ => {
                return Err(GatewayError::Config(
                    "AZURE_STORAGE_ACCOUNT, AZURE_STORAGE_ACCESS_KEY and AZURE_STORAGE_CONTAINER must be set together"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            port,
            environment,
            redis_url: var("REDIS_URL"),
            database_url: var("DATABASE_URL"),
            sentry_dsn: var("SENTRY_DSN"),
            cat_fact_url: var("CAT_FACT_URL").unwrap_or_else(|| DEFAULT_FACT_URL.to_string()),
            cat_image_url: var("CAT_IMAGE_URL").unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            upstream_timeout_secs,
            external_cache_ttl_secs,
            storage,
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert!(config.redis_url.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.cat_fact_url, DEFAULT_FACT_URL);
        assert_eq!(config.cat_image_url, DEFAULT_IMAGE_URL);
        assert_eq!(config.upstream_timeout_secs, 10);
        assert!(config.external_cache_ttl_secs.is_none());
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("ENVIRONMENT", "production"),
            ("REDIS_URL", "redis://cache:6379"),
            ("EXTERNAL_CACHE_TTL_SECS", "300"),
            ("LOCAL_STORAGE_DIR", "/var/blobs"),
        ])
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.environment, "production");
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.external_cache_ttl_secs, Some(300));
        assert_eq!(
            config.storage,
            StorageBackend::Local {
                root: PathBuf::from("/var/blobs")
            }
        );
    }

    #[test]
    fn test_azure_storage() {
        let config = config_from(&[
            ("AZURE_STORAGE_ACCOUNT", "labaccount"),
            ("AZURE_STORAGE_ACCESS_KEY", "c2VjcmV0"),
            ("AZURE_STORAGE_CONTAINER", "uploads"),
            ("LOCAL_STORAGE_DIR", "/ignored"),
        ])
        .unwrap();

        assert!(matches!(
            config.storage,
            StorageBackend::Azure { ref container, .. } if container == "uploads"
        ));
    }

    #[test]
    fn test_partial_azure_storage_rejected() {
        let err = config_from(&[("AZURE_STORAGE_ACCOUNT", "labaccount")]).unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(config_from(&[("EXTERNAL_CACHE_TTL_SECS", "0")]).is_err());
        assert!(config_from(&[("EXTERNAL_CACHE_TTL_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("REDIS_URL", "  "), ("PORT", "")]).unwrap();
        assert!(config.redis_url.is_none());
        assert_eq!(config.port, 8000);
    }
}
