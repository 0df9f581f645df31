//! Chat-level error types.

use dossier_types::ApiError;
use thiserror::Error;

/// Errors returned to the caller of chat operations.
///
/// API failures during `send`/`choose_option` are not errors at this level:
/// they are absorbed into the transcript as a single bot fallback message.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("A request is already in flight")]
    Busy,

    #[error("Session not initialized")]
    NoSession,

    #[error("Invalid option index {index} (have {count} options)")]
    InvalidOption { index: usize, count: usize },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] dossier_session::SessionError),
}
