// src/models.rs
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender recorded on the message seeded by `create_session`.
pub const SYSTEM_SENDER: &str = "system";

/// Truncate to the precision the stores persist, so a value handed back
/// from `save` compares equal to the same row read later.
pub fn stored_precision(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(6)
}

pub fn now() -> DateTime<Utc> {
    stored_precision(Utc::now())
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// A message as stored and as returned in history listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: String,
    pub session_id: String,
    pub content: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

/// Session about to be saved; missing fields are generated by the store.
#[derive(Clone, Debug, Default)]
pub struct NewSession {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Message about to be saved; missing id and timestamp are generated by the store.
#[derive(Clone, Debug)]
pub struct NewMessage {
    pub id: Option<String>,
    pub session_id: String,
    pub content: String,
    pub sender: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewMessage {
    pub fn new(
        session_id: impl Into<String>,
        content: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            session_id: session_id.into(),
            content: content.into(),
            sender: sender.into(),
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_wire_names() {
        let msg = Message {
            id: "m-1".into(),
            session_id: "s-1".into(),
            content: "Hello".into(),
            sender: "John".into(),
            timestamp: now(),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["message_id"], "m-1");
        assert_eq!(json["session_id"], "s-1");
        assert!(json.get("id").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn now_has_microsecond_precision() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000, 0);
    }
}
