use thiserror::Error;

/// Errors from key-value store and codec operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while encoding a document.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The key cannot be mapped onto the backend's namespace.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Internal backend failure (e.g. a poisoned lock).
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
