//! HTTP provider implementation.

use crate::client::ApiClient;
use dossier_types::provider::{BoxFuture, ResearchProvider};
use dossier_types::{ApiError, ResearchResponse, SessionTranscript};

/// HTTP-backed research provider.
///
/// Wraps `ApiClient` and implements the `ResearchProvider` trait,
/// delegating each operation to the underlying client.
#[derive(Clone)]
pub struct HttpProvider {
    client: ApiClient,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(base_url)?,
        })
    }
}

impl ResearchProvider for HttpProvider {
    fn submit_query<'a>(
        &'a self,
        question: &'a str,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>> {
        Box::pin(self.client.submit_query(question))
    }

    fn submit_option<'a>(
        &'a self,
        session_id: &'a str,
        wire_index: u32,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>> {
        Box::pin(self.client.submit_option(session_id, wire_index))
    }

    fn submit_custom<'a>(
        &'a self,
        session_id: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, Result<ResearchResponse, ApiError>> {
        Box::pin(self.client.submit_custom(session_id, text))
    }

    fn fetch_session<'a>(
        &'a self,
        session_id: &'a str,
    ) -> BoxFuture<'a, Result<SessionTranscript, ApiError>> {
        Box::pin(self.client.fetch_session(session_id))
    }

    fn name(&self) -> &str {
        "http"
    }
}
