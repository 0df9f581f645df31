//! Chat state machine and session reconciliation for Dossier.

pub mod chat;
pub mod error;
pub mod state;

pub use chat::Chat;
pub use error::ChatError;
pub use state::{ChatState, GREETING};
