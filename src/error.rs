//! Error types for configuration and persistence.
//!
//! The contact path never fails; only loading settings and talking to a
//! state store return `BreakerResult<T>`.

use thiserror::Error;

/// Unified error type for the fallible edges of the game.
#[derive(Debug, Error)]
pub enum BreakerError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A settings value is out of its valid range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Convenience alias for `Result<T, BreakerError>`.
pub type BreakerResult<T> = Result<T, BreakerError>;
