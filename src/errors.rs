use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{details}")]
    IntegrityViolation { details: String },

    #[error("Stored cart data could not be parsed: {0}")]
    CorruptPersistedState(#[source] serde_json::Error),

    #[error("Could not serialize cart: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CartError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CartError::NotFound {
            message: message.into(),
        }
    }

    pub fn integrity(details: impl Into<String>) -> Self {
        CartError::IntegrityViolation {
            details: details.into(),
        }
    }
}
