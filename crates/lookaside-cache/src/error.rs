use std::fmt;

/// Errors from a cache store
#[derive(Debug)]
pub enum CacheError {
    Redis(redis::RedisError),
    Serialization(serde_json::Error),
    InvalidTtl,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis(e) => write!(f, "Redis error: {e}"),
            Self::Serialization(e) => write!(f, "Serialization error: {e}"),
            Self::InvalidTtl => write!(f, "TTL must be at least one second"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Redis(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::InvalidTtl => None,
        }
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ttl_display() {
        assert_eq!(
            CacheError::InvalidTtl.to_string(),
            "TTL must be at least one second"
        );
    }

    #[test]
    fn test_serialization_error_has_source() {
        let err: CacheError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
