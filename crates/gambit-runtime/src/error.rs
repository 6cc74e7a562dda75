//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StoreError;

/// Errors that can occur during runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Datastore operation failed.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
