//! The chat view state machine.
//!
//! Two states: `NoSession` (no session id yet) and `ActiveSession`
//! (session id set). A successful initial query moves forward; "new chat"
//! moves back; loading a saved transcript replaces the session in place.
//! All mutation happens between awaits on a single logical thread, so the
//! busy flag is a guard against double submission, not a lock.

use dossier_types::{AnswerPayload, Message, ResearchResponse, SessionTranscript};

/// Greeting shown at the start of every fresh chat view.
pub const GREETING: &str = "Hi! I can help you research companies. Ask me about \
any company and I can provide detailed information about their operations, \
goals, and more.";

/// Transient state of the chat view.
#[derive(Debug)]
pub struct ChatState {
    messages: Vec<Message>,
    session_id: Option<String>,
    company: Option<String>,
    options: Vec<String>,
    busy: bool,
}

impl ChatState {
    /// A fresh view in the `NoSession` state, holding only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot_text(1, GREETING)],
            session_id: None,
            company: None,
            options: Vec::new(),
            busy: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The company under research, once the server has identified one.
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Server-suggested follow-up options for the latest answer.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// The text of a suggested option by 0-based index.
    pub fn option_text(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    fn next_id(&self) -> usize {
        self.messages.len() + 1
    }

    /// Append a user message; suggested options are consumed by the send.
    pub fn push_user(&mut self, text: impl Into<String>) {
        let msg = Message::user(self.next_id(), text);
        self.messages.push(msg);
        self.options.clear();
    }

    /// Append a plain bot message (greeting or error fallback).
    pub fn push_bot_text(&mut self, text: impl Into<String>) {
        let msg = Message::bot_text(self.next_id(), text);
        self.messages.push(msg);
    }

    /// Merge a query/follow-up response into the view.
    ///
    /// Session id and company stick once learned; follow-up responses that
    /// omit them leave the current values alone. The answer becomes a bot
    /// message tagged with the company the response itself named (follow-up
    /// answers render without a company header, as in the transcript).
    pub fn apply_response(&mut self, response: ResearchResponse) {
        if response.session_id.is_some() {
            self.session_id = response.session_id;
        }
        if response
            .company
            .as_ref()
            .is_some_and(|c| !c.is_empty())
        {
            self.company = response.company.clone();
        }

        let answer = response
            .answer
            .unwrap_or_else(|| AnswerPayload::Structured(Default::default()));
        let msg = Message::bot_answer(self.next_id(), answer, response.company);
        self.messages.push(msg);
        self.options = response.options;
    }

    /// Reset to `NoSession`: greeting only, everything else cleared.
    pub fn reset(&mut self) {
        *self = ChatState::new();
    }

    /// Replace the view with a server-fetched transcript.
    ///
    /// Each history entry reconstructs as one user message and one bot
    /// message, in order. The session id is replaced and suggested options
    /// are cleared (the server does not persist them).
    pub fn load_transcript(&mut self, transcript: SessionTranscript) {
        let mut messages = Vec::with_capacity(transcript.history.len() * 2);
        for entry in &transcript.history {
            messages.push(Message::user(messages.len() + 1, entry.question.clone()));
            messages.push(Message::bot_answer(
                messages.len() + 1,
                entry.answer(),
                entry.company.clone().filter(|c| !c.is_empty()),
            ));
        }

        self.messages = messages;
        self.session_id = Some(transcript.id);
        self.company = transcript.company.filter(|c| !c.is_empty());
        self.options.clear();
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}
