//! Durable message log (persistence adapter).
//!
//! Append-only table of chat rows; the read path returns the most recent N,
//! newest first. The paired user/bot insert is deliberately not wrapped in a
//! transaction — a crash between the two inserts leaves an orphaned user row,
//! which the read path tolerates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Default row count for the read path.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// One persisted chat row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredMessage {
    pub id: i64,
    pub username: String,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Append-only message log over MySQL.
#[derive(Clone)]
pub struct MessageStore {
    pool: MySqlPool,
}

impl MessageStore {
    /// Connect and make sure the messages table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect(&config.url())
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool (tests).
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                username VARCHAR(64) NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append one row; id and timestamp are assigned by the database.
    pub async fn append(&self, username: &str, content: &str) -> Result<()> {
        sqlx::query("INSERT INTO messages (username, content) VALUES (?, ?)")
            .bind(username)
            .bind(content)
            .execute(&self.pool)
            .await?;
        debug!(username, "message persisted");
        Ok(())
    }

    /// Most recent rows, newest first, bounded by `limit`.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<StoredMessage>> {
        let rows = sqlx::query_as::<_, StoredMessage>(
            "SELECT id, username, content, created_at
             FROM messages
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
