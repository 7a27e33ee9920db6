//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs.

use fbot_core::FbotError;
use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<StorageError> for FbotError {
    fn from(err: StorageError) -> Self {
        FbotError::Storage(err.to_string())
    }
}
