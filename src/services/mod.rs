// src/services/mod.rs
pub mod chat_service;
pub mod message_store;
pub mod session_store;

use chrono::{DateTime, SecondsFormat, Utc};

pub use chat_service::{ChatError, ChatService};
pub use message_store::{MessageStore, SqliteMessageStore};
pub use session_store::{SessionStore, SqliteSessionStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored value: {0}")]
    Corrupt(String),
}

/// Fixed-width UTC text, so `ORDER BY` on the column is chronological.
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid timestamp {s:?}: {e}")))
}
