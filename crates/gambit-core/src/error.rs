//! Error types for the core message model.

use thiserror::Error;

/// Errors the platform send primitive can report.
///
/// These never reach listener callbacks — the reply dispatcher logs them
/// and moves on.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The platform connection is not available.
    #[error("platform connection is not available")]
    NotConnected,

    /// The platform rejected or dropped the message.
    #[error("failed to send message: {0}")]
    Failed(String),
}

/// Result type for send operations.
pub type SendResult<T> = Result<T, SendError>;
