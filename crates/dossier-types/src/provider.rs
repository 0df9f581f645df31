//! Provider trait for the company-research backend.

use crate::error::ApiError;
use crate::message::{ResearchResponse, SessionTranscript};
use std::future::Future;
use std::pin::Pin;

/// A boxed future, so the trait stays dyn-compatible.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The four request/response operations the chat layer needs.
///
/// Dyn-compatible so the chat glue works with `Arc<dyn ResearchProvider>`
/// and tests can substitute a canned mock for the HTTP client.
pub trait ResearchProvider: Send + Sync {
    /// Start a new research session with an initial question.
    fn submit_query<'a>(
        &'a self,
        question: &'a str,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>>;

    /// Follow up with one of the server-suggested options.
    /// `wire_index` is 1-based, matching the backend.
    fn submit_option<'a>(
        &'a self,
        session_id: &'a str,
        wire_index: u32,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>>;

    /// Follow up with a free-form question.
    fn submit_custom<'a>(
        &'a self,
        session_id: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>>;

    /// Fetch the full transcript of a session.
    fn fetch_session<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, Result<SessionTranscript, ApiError>>;

    /// Provider name for logging/display (e.g. "http").
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn provider_is_dyn_compatible() {
        // Compile-time check: ResearchProvider can be used as a trait object.
        fn _accept(_p: &dyn ResearchProvider) {}
    }

    #[test]
    fn arc_provider_is_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Arc<dyn ResearchProvider>>();
    }
}
