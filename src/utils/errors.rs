use thiserror::Error;

/// Main error type for Scamwatch
#[derive(Error, Debug)]
pub enum ScamwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    ValidationError(#[from] crate::models::ValidationError),

    #[error("Please login first")]
    NotLoggedIn,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("{0}")]
    ApiError(String),
}
