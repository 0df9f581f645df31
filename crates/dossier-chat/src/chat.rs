//! Chat orchestration: one user action, one network call, one merge.
//!
//! `Chat` owns the view state, the provider, and the local session store.
//! Every operation awaits its single request to completion; the busy flag
//! rejects overlapping submissions. API failures during a send are reduced
//! to a single bot fallback message; store failures are logged and never
//! fail the chat action.

use crate::error::ChatError;
use crate::state::ChatState;
use dossier_session::{SessionStore, SessionSummary};
use dossier_types::{ApiError, ResearchProvider, ResearchResponse};
use std::sync::Arc;

/// The chat view glue: provider + store + state.
pub struct Chat {
    provider: Arc<dyn ResearchProvider>,
    store: SessionStore,
    state: ChatState,
}

impl Chat {
    pub fn new(provider: Arc<dyn ResearchProvider>, store: SessionStore) -> Self {
        Self {
            provider,
            store,
            state: ChatState::new(),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Send user input: an initial query when no session exists, otherwise
    /// a custom follow-up. Blank input is ignored.
    ///
    /// An API failure appends exactly one bot error message and reports
    /// success; the caller renders the transcript either way.
    pub async fn send(&mut self, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        if self.state.is_busy() {
            return Err(ChatError::Busy);
        }

        self.state.set_busy(true);
        self.state.push_user(text);

        let result = match self.state.session_id().map(String::from) {
            Some(session_id) => self.provider.submit_custom(&session_id, text).await,
            None => self.provider.submit_query(text).await,
        };

        self.finish_turn(result).await;
        Ok(())
    }

    /// Send one of the server-suggested follow-up options by 0-based index.
    /// The option's text is echoed as the user message; the wire index is
    /// 1-based.
    pub async fn choose_option(&mut self, index: usize) -> Result<(), ChatError> {
        if self.state.is_busy() {
            return Err(ChatError::Busy);
        }
        let session_id = self
            .state
            .session_id()
            .map(String::from)
            .ok_or(ChatError::NoSession)?;
        let text = self
            .state
            .option_text(index)
            .map(String::from)
            .ok_or(ChatError::InvalidOption {
                index,
                count: self.state.options().len(),
            })?;

        self.state.set_busy(true);
        self.state.push_user(text);

        let result = self
            .provider
            .submit_option(&session_id, (index + 1) as u32)
            .await;

        self.finish_turn(result).await;
        Ok(())
    }

    /// Fetch a saved session's transcript and replace the view with it.
    /// On failure the current view is left untouched.
    pub async fn load_session(&mut self, session_id: &str) -> Result<(), ChatError> {
        if self.state.is_busy() {
            return Err(ChatError::Busy);
        }
        self.state.set_busy(true);
        let result = self.provider.fetch_session(session_id).await;
        self.state.set_busy(false);

        let transcript = result?;
        self.state.load_transcript(transcript);
        Ok(())
    }

    /// Start over: back to `NoSession` with a fresh greeting.
    /// The persisted session list is unaffected.
    pub fn new_chat(&mut self) {
        self.state.reset();
    }

    /// The locally persisted session list.
    pub async fn sessions(&self) -> Vec<SessionSummary> {
        self.store.load().await
    }

    /// Remove a saved session from the local list (server state remains).
    pub async fn delete_session(&mut self, session_id: &str) -> Result<(), ChatError> {
        self.store.delete(session_id).await?;
        Ok(())
    }

    /// Merge the outcome of a send into the view and record new sessions.
    async fn finish_turn(&mut self, result: Result<ResearchResponse, ApiError>) {
        let had_session = self.state.has_session();

        match result {
            Ok(response) => {
                let new_session_id = response
                    .session_id
                    .clone()
                    .filter(|_| !had_session);
                self.state.apply_response(response);

                if let Some(session_id) = new_session_id {
                    let company = self.state.company().unwrap_or_default().to_string();
                    let summary = SessionSummary::new(session_id, company);
                    if let Err(e) = self.store.save(summary).await {
                        tracing::warn!("Failed to save session summary: {e}");
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Request failed: {e}");
                self.state
                    .push_bot_text(format!("Sorry, I encountered an error: {e}. Please try again."));
            }
        }

        self.state.set_busy(false);
    }
}
