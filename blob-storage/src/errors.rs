use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error while writing object: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object key is not valid for this store: {0}")]
    InvalidKey(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Object store request failed: {0}")]
    Backend(String),

    #[error("Failed to serialize object metadata")]
    Serialization(#[from] serde_json::Error),
}
