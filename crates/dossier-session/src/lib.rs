//! Locally persisted session list for Dossier.

pub mod error;
pub mod store;
pub mod types;

pub use error::SessionError;
pub use store::SessionStore;
pub use types::SessionSummary;
