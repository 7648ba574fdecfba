// src/services/session_store.rs
use std::future::Future;

use sqlx::{Row, SqliteConnection};

use super::{StoreError, format_timestamp, parse_timestamp};
use crate::models::{NewSession, Session, new_id, now, stored_precision};

/// Persistence for chat sessions.
///
/// Every call runs on the connection it is handed, normally the transaction
/// opened by the chat service for the current operation.
pub trait SessionStore: Send + Sync {
    /// Insert a session, generating its id and creation time when absent.
    fn save(
        &self,
        conn: &mut SqliteConnection,
        session: NewSession,
    ) -> impl Future<Output = Result<Session, StoreError>> + Send;

    fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> impl Future<Output = Result<Option<Session>, StoreError>> + Send;

    fn count(
        &self,
        conn: &mut SqliteConnection,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteSessionStore;

struct SessionRow {
    id: String,
    created_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<Session, StoreError> {
        Ok(Session {
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
        })
    }
}

impl SessionStore for SqliteSessionStore {
    async fn save(
        &self,
        conn: &mut SqliteConnection,
        session: NewSession,
    ) -> Result<Session, StoreError> {
        let session = Session {
            id: session.id.unwrap_or_else(new_id),
            created_at: session
                .created_at
                .map(stored_precision)
                .unwrap_or_else(now),
        };

        sqlx::query("INSERT INTO chat_sessions (id, created_at) VALUES (?, ?)")
            .bind(&session.id)
            .bind(format_timestamp(&session.created_at))
            .execute(&mut *conn)
            .await?;

        Ok(session)
    }

    async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query("SELECT id, created_at FROM chat_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(Some(SessionRow::from_row(&row)?.into_session()?)),
            None => Ok(None),
        }
    }

    async fn count(&self, conn: &mut SqliteConnection) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM chat_sessions")
            .fetch_one(&mut *conn)
            .await?;

        let count: i64 = row.try_get("cnt")?;
        Ok(count as u64)
    }
}
