// src/services/message_store.rs
use std::future::Future;

use sqlx::{Row, SqliteConnection};

use super::{StoreError, format_timestamp, parse_timestamp};
use crate::models::{Message, NewMessage, new_id, now, stored_precision};

/// Persistence for chat messages.
pub trait MessageStore: Send + Sync {
    /// Insert a message, generating its id and timestamp when absent.
    fn save(
        &self,
        conn: &mut SqliteConnection,
        message: NewMessage,
    ) -> impl Future<Output = Result<Message, StoreError>> + Send;

    /// All messages of a session, oldest first. Equal timestamps keep insertion order.
    fn find_by_session_ordered(
        &self,
        conn: &mut SqliteConnection,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, StoreError>> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteMessageStore;

struct MessageRow {
    id: String,
    session_id: String,
    content: String,
    sender: String,
    timestamp: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            content: row.try_get("content")?,
            sender: row.try_get("sender")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        Ok(Message {
            timestamp: parse_timestamp(&self.timestamp)?,
            id: self.id,
            session_id: self.session_id,
            content: self.content,
            sender: self.sender,
        })
    }
}

impl MessageStore for SqliteMessageStore {
    async fn save(
        &self,
        conn: &mut SqliteConnection,
        message: NewMessage,
    ) -> Result<Message, StoreError> {
        let message = Message {
            id: message.id.unwrap_or_else(new_id),
            session_id: message.session_id,
            content: message.content,
            sender: message.sender,
            timestamp: message
                .timestamp
                .map(stored_precision)
                .unwrap_or_else(now),
        };

        sqlx::query(
            r#"INSERT INTO chat_messages (id, session_id, content, sender, timestamp)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&message.id)
        .bind(&message.session_id)
        .bind(&message.content)
        .bind(&message.sender)
        .bind(format_timestamp(&message.timestamp))
        .execute(&mut *conn)
        .await?;

        Ok(message)
    }

    async fn find_by_session_ordered(
        &self,
        conn: &mut SqliteConnection,
        session_id: &str,
    ) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT id, session_id, content, sender, timestamp
               FROM chat_messages
               WHERE session_id = ?
               ORDER BY timestamp ASC, rowid ASC"#,
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            messages.push(MessageRow::from_row(row)?.into_message()?);
        }
        Ok(messages)
    }
}
