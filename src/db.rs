// src/db.rs
//! SQLite connection pools.
//!
//! SQLite allows a single writer at a time, so writes go through a one-connection
//! pool while reads use a separate pool opened read-only. Both run in WAL mode
//! with foreign keys enforced.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Database {
    /// Read-only pool used by lookups and history queries.
    pub reader: SqlitePool,
    /// Single-connection pool for inserts.
    pub writer: SqlitePool,
}

impl Database {
    /// Open `database_url` and run pending migrations.
    ///
    /// `sqlite::memory:` URLs are routed to [`Database::in_memory`] since an
    /// in-memory database only exists on the connection that created it.
    pub async fn connect(database_url: &str, readers: u32) -> Result<Self, sqlx::Error> {
        if database_url.contains(":memory:") {
            return Self::in_memory().await;
        }

        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(base_opts)
            .await?;

        // The reader pool can only open once the file and schema exist.
        sqlx::migrate!().run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(readers.max(1))
            .connect_with(read_opts)
            .await?;

        debug!(database_url, readers, "database pools ready");
        Ok(Self { reader, writer })
    }

    /// A private in-memory database behind one long-lived connection.
    ///
    /// Reader and writer share that connection, so read-only mode is not
    /// enforced at the connection level here.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self {
            reader: pool.clone(),
            writer: pool,
        })
    }

    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_url(dir: &tempfile::TempDir, name: &str) -> String {
        format!("sqlite://{}?mode=rwc", dir.path().join(name).display())
    }

    #[tokio::test]
    async fn migrations_create_both_tables() {
        let db = Database::in_memory().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'chat_%' ORDER BY name",
        )
        .fetch_all(&db.reader)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["chat_messages", "chat_sessions"]);
    }

    #[tokio::test]
    async fn file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::connect(&file_url(&dir, "wal.db"), 2).await.unwrap();

        let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&db.writer)
            .await
            .unwrap();
        assert_eq!(mode.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn reader_pool_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::connect(&file_url(&dir, "ro.db"), 2).await.unwrap();

        let result = sqlx::query("INSERT INTO chat_sessions (id, created_at) VALUES ('x', 'y')")
            .execute(&db.reader)
            .await;
        assert!(result.is_err(), "reader pool must be read-only");
    }

    #[tokio::test]
    async fn memory_url_selects_in_memory_mode() {
        let db = Database::connect("sqlite::memory:", 4).await.unwrap();

        sqlx::query("INSERT INTO chat_sessions (id, created_at) VALUES ('s1', 't')")
            .execute(&db.writer)
            .await
            .unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_sessions")
            .fetch_one(&db.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }
}
