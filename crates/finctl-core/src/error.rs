//! Error types for finctl-core.

use thiserror::Error;

use crate::normalizer::ApiError;
use crate::validation::ValidationErrors;

/// Result type alias using finctl-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for finctl operations
#[derive(Error, Debug)]
pub enum Error {
    // HTTP errors (already normalized, carries the user-facing message)
    #[error("{0}")]
    Api(#[from] ApiError),

    // Session errors
    #[error("Session token not found")]
    NoToken,

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage key not found: {0}")]
    MissingKey(String),

    // Client-side form validation
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The normalized message for HTTP failures, if this is one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Api(e) => Some(&e.user_message),
            _ => None,
        }
    }

    /// HTTP status of the failed call, if the server replied.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
