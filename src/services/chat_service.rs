// src/services/chat_service.rs
use tracing::{info, warn};

use super::{MessageStore, SessionStore, SqliteMessageStore, SqliteSessionStore, StoreError};
use crate::db::Database;
use crate::models::{Message, NewMessage, NewSession, SYSTEM_SENDER, Session};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transaction failed: {0}")]
    Transaction(#[from] sqlx::Error),
}

/// Session and message bookkeeping.
///
/// Each public operation runs inside one transaction: writes on the writer
/// pool, lookups on the read-only pool.
#[derive(Debug, Clone)]
pub struct ChatService<S = SqliteSessionStore, M = SqliteMessageStore> {
    db: Database,
    sessions: S,
    messages: M,
}

impl ChatService {
    pub fn new(db: Database) -> Self {
        Self::with_stores(db, SqliteSessionStore, SqliteMessageStore)
    }
}

impl<S: SessionStore, M: MessageStore> ChatService<S, M> {
    pub fn with_stores(db: Database, sessions: S, messages: M) -> Self {
        Self {
            db,
            sessions,
            messages,
        }
    }

    /// Create a session, seeding a `system` message when `initial_message`
    /// has any non-whitespace content.
    pub async fn create_session(&self, initial_message: Option<&str>) -> Result<Session, ChatError> {
        let seed = initial_message.filter(|m| !m.trim().is_empty());
        let provided = if seed.is_some() { "provided" } else { "none" };
        info!(initial_message = provided, "creating chat session");

        let mut tx = self.db.writer.begin().await?;
        let session = self.sessions.save(&mut *tx, NewSession::default()).await?;

        if let Some(content) = seed {
            self.messages
                .save(&mut *tx, NewMessage::new(&session.id, content, SYSTEM_SENDER))
                .await?;
        }
        tx.commit().await?;

        info!(session_id = %session.id, "created chat session");
        Ok(session)
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        content: &str,
        sender: &str,
    ) -> Result<Message, ChatError> {
        info!(session_id, sender, "sending message");

        let mut tx = self.db.writer.begin().await?;
        if self.sessions.find_by_id(&mut *tx, session_id).await?.is_none() {
            warn!(session_id, "session not found");
            return Err(ChatError::SessionNotFound(session_id.to_string()));
        }

        let message = self
            .messages
            .save(&mut *tx, NewMessage::new(session_id, content, sender))
            .await?;
        tx.commit().await?;

        info!(message_id = %message.id, "message sent");
        Ok(message)
    }

    /// Messages of an existing session, oldest first.
    pub async fn get_chat_history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        info!(session_id, "retrieving chat history");

        let mut tx = self.db.reader.begin().await?;
        if self.sessions.find_by_id(&mut *tx, session_id).await?.is_none() {
            warn!(session_id, "session not found");
            return Err(ChatError::SessionNotFound(session_id.to_string()));
        }

        let messages = self
            .messages
            .find_by_session_ordered(&mut *tx, session_id)
            .await?;
        tx.commit().await?;

        info!(session_id, count = messages.len(), "retrieved chat history");
        Ok(messages)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ChatError> {
        let mut tx = self.db.reader.begin().await?;
        let session = self.sessions.find_by_id(&mut *tx, session_id).await?;
        tx.commit().await?;
        Ok(session)
    }

    pub async fn get_session_count(&self) -> Result<u64, ChatError> {
        let mut tx = self.db.reader.begin().await?;
        let count = self.sessions.count(&mut *tx).await?;
        tx.commit().await?;
        Ok(count)
    }
}
