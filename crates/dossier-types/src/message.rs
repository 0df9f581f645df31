//! Chat messages and the research API wire types.

use crate::answer::AnswerPayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// A single message in the current chat view.
///
/// Immutable once appended; ids are assigned sequentially per view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: usize,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Message {
    /// A plain user message.
    pub fn user(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            text: Some(text.into()),
            answer: None,
            company: None,
        }
    }

    /// A plain bot message (greeting, error fallback).
    pub fn bot_text(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Bot,
            text: Some(text.into()),
            answer: None,
            company: None,
        }
    }

    /// A bot message carrying a research answer.
    pub fn bot_answer(id: usize, answer: AnswerPayload, company: Option<String>) -> Self {
        Self {
            id,
            role: Role::Bot,
            text: None,
            answer: Some(answer),
            company,
        }
    }
}

/// Body of `POST /query/`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub question: String,
    pub clarifiers: String,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            clarifiers: String::new(),
        }
    }
}

/// Body of `POST /followup/` — either a suggested option by index or a
/// custom question, never both.
///
/// `option_index` is 1-based on the wire; the backend subtracts one.
#[derive(Debug, Clone, Serialize)]
pub struct FollowupRequest {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl FollowupRequest {
    pub fn option(session_id: impl Into<String>, wire_index: u32) -> Self {
        Self {
            session_id: session_id.into(),
            option_index: Some(wire_index),
            custom: None,
        }
    }

    pub fn custom(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            option_index: None,
            custom: Some(text.into()),
        }
    }
}

/// Response shape shared by `/query/` and `/followup/`.
///
/// Follow-up responses omit `topic` and `company`; the initial query
/// response carries all fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchResponse {
    pub session_id: Option<String>,
    pub topic: Option<String>,
    pub company: Option<String>,
    pub answer: Option<AnswerPayload>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Full transcript of a server-side session, from `GET /session/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTranscript {
    pub id: String,
    pub company: Option<String>,
    #[serde(default)]
    pub history: Vec<TranscriptEntry>,
}

/// One question/answer pair in a session transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub topic: Option<String>,
    pub company: Option<String>,
    /// Either a JSON object or a string that may itself contain JSON.
    #[serde(default)]
    pub answer_json: Value,
}

impl TranscriptEntry {
    /// Decode the stored answer, whichever form it was persisted in.
    pub fn answer(&self) -> AnswerPayload {
        AnswerPayload::from_answer_json(&self.answer_json)
    }
}
