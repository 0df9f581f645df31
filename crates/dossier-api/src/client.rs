//! Research API client.
//!
//! Four request/response operations, each a single fetch: initial query,
//! follow-up by option index, custom follow-up, and session transcript.
//! Failures surface as one `ApiError`; the caller renders a fallback and
//! does not retry.

use dossier_types::{
    ApiError, FollowupRequest, QueryRequest, ResearchResponse, SessionTranscript,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for the company-research API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    /// (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /query/` — start a research session with an initial question.
    pub async fn submit_query(&self, question: &str) -> Result<ResearchResponse, ApiError> {
        self.post_json("query/", &QueryRequest::new(question)).await
    }

    /// `POST /followup/` — follow up with a suggested option.
    /// `wire_index` is 1-based, matching the backend.
    pub async fn submit_option(
        &self,
        session_id: &str,
        wire_index: u32,
    ) -> Result<ResearchResponse, ApiError> {
        self.post_json("followup/", &FollowupRequest::option(session_id, wire_index))
            .await
    }

    /// `POST /followup/` — follow up with a free-form question.
    pub async fn submit_custom(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ResearchResponse, ApiError> {
        self.post_json("followup/", &FollowupRequest::custom(session_id, text))
            .await
    }

    /// `GET /session/{id}/` — fetch the full transcript of a session.
    pub async fn fetch_session(&self, session_id: &str) -> Result<SessionTranscript, ApiError> {
        let url = format!("{}/session/{}/", self.base_url, session_id);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }
}

/// Turn a response into the expected body, classifying non-2xx statuses.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_error(status.as_u16(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Classify an HTTP error response into a typed ApiError.
///
/// The backend reports failures as `{"error": "...", "detail": "..."}`;
/// framework-level errors (e.g. unknown session) use `{"detail": "..."}`.
fn classify_error(status: u16, body: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        detail: Option<String>,
    }

    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = match parsed {
        Some(ErrorBody {
            error: Some(error),
            detail: Some(detail),
        }) => format!("{error}: {detail}"),
        Some(ErrorBody {
            error: Some(error), ..
        }) => error,
        Some(ErrorBody {
            detail: Some(detail),
            ..
        }) => detail,
        _ => body.to_string(),
    };

    match status {
        400 => ApiError::BadRequest { message },
        404 => ApiError::NotFound { message },
        _ => ApiError::Server { status, message },
    }
}
