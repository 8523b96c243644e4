use std::fmt;

/// Errors from the storage facade
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    InvalidName(String),
    Backend(object_store::Error),
    Io(Box<std::io::Error>),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "File '{name}' not found"),
            Self::InvalidName(msg) => write!(f, "Invalid file name: {msg}"),
            Self::Backend(e) => write!(f, "Storage backend error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        Self::Backend(err)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
