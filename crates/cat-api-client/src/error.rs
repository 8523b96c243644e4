use std::fmt;

/// Errors from the upstream cat APIs
#[derive(Debug)]
pub enum CatApiError {
    Http(reqwest::Error),
    Status(u16),
    Malformed(String),
}

impl fmt::Display for CatApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status(code) => write!(f, "Upstream returned status {code}"),
            Self::Malformed(msg) => write!(f, "Malformed upstream response: {msg}"),
        }
    }
}

impl std::error::Error for CatApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for CatApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatApiError>;
