// src/message.rs
//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Message, Session};
use crate::validation::FieldErrors;

pub const MAX_INITIAL_MESSAGE_CHARS: usize = 100;
pub const MAX_CONTENT_CHARS: usize = 500;
pub const MAX_SENDER_CHARS: usize = 50;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub initial_message: Option<String>,
}

impl CreateSessionRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.max_chars(
            "initial_message",
            self.initial_message.as_deref(),
            MAX_INITIAL_MESSAGE_CHARS,
            "Initial message cannot exceed 100 characters",
        );
        errors.finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Session> for CreateSessionResponse {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id,
            created_at: session.created_at,
        }
    }
}

/// Fields are optional so a missing one is reported as a field error rather
/// than a body parse failure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

/// A [`SendMessageRequest`] that passed validation.
#[derive(Debug)]
pub struct ValidSendMessage {
    pub session_id: String,
    pub content: String,
    pub sender: String,
}

impl SendMessageRequest {
    pub fn validate(self) -> Result<ValidSendMessage, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.required(
            "session_id",
            self.session_id.as_deref(),
            "Session ID is required",
        );
        errors.required(
            "content",
            self.content.as_deref(),
            "Message content is required",
        );
        errors.max_chars(
            "content",
            self.content.as_deref(),
            MAX_CONTENT_CHARS,
            "Message content cannot exceed 500 characters",
        );
        errors.required("sender", self.sender.as_deref(), "Sender is required");
        errors.max_chars(
            "sender",
            self.sender.as_deref(),
            MAX_SENDER_CHARS,
            "Sender name cannot exceed 50 characters",
        );

        match (self.session_id, self.content, self.sender) {
            (Some(session_id), Some(content), Some(sender)) if errors.is_empty() => {
                Ok(ValidSendMessage {
                    session_id,
                    content,
                    sender,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Body of a sent message; history entries share the same shape.
pub type SendMessageResponse = Message;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub active_sessions: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    pub metrics: HealthMetrics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<std::collections::BTreeMap<String, String>>,
}
