//! Shared types and error hierarchy for Dossier.

pub mod answer;
pub mod error;
pub mod message;
pub mod provider;
pub mod util;

pub use answer::*;
pub use error::{ApiError, ConfigError};
pub use message::*;
pub use provider::{BoxFuture, ResearchProvider};
pub use util::{ellipsize, truncate_str};
