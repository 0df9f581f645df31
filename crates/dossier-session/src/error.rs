//! Session-store error types.

use thiserror::Error;

/// Errors that can occur while persisting the session list.
///
/// Loading never errors: a missing or malformed file reads as an empty list.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
