//! Error types for the Gambit framework.

use thiserror::Error;

/// Errors that can occur while building or registering a listener.
///
/// Listeners are constructed at startup; any of these aborts
/// initialization rather than surfacing at dispatch time.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A listener must declare at least one pattern.
    #[error("listener declares no patterns")]
    EmptyPatterns,

    /// A listener must accept at least one message category.
    #[error("listener accepts no message categories")]
    EmptyCategories,

    /// A listener pattern failed to compile.
    #[error("invalid listener pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for listener construction and registration.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur during a dispatch pass.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The matched listener's callback returned an error.
    ///
    /// Caught at the event-ingestion boundary, which logs it and sends the
    /// apology reply; it never propagates past a single event.
    #[error("listener callback failed: {0}")]
    Callback(#[source] anyhow::Error),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
