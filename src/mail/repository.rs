//! Message repository for Minimail.

use chrono::Utc;
use sqlx::SqlitePool;

use super::types::{Message, NewMessage, TIME_FORMAT};
use crate::error::{MinimailError, Result};

/// Repository for message operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a message, stamping it with the current time.
    pub async fn create(&self, message: &NewMessage) -> Result<Message> {
        let created_at = Utc::now().format(TIME_FORMAT).to_string();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO messages (sender, recipient, subject, body, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(&created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| MinimailError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| MinimailError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(
            "SELECT id, sender, recipient, subject, body, created_at
             FROM messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MinimailError::Database(e.to_string()))?;

        Ok(message)
    }

    /// List messages received by an identity, newest first.
    pub async fn list_inbox(&self, recipient: &str) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, sender, recipient, subject, body, created_at
             FROM messages WHERE recipient = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(recipient)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MinimailError::Database(e.to_string()))?;

        Ok(messages)
    }

    /// List messages sent by an identity, newest first.
    pub async fn list_sent(&self, sender: &str) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, sender, recipient, subject, body, created_at
             FROM messages WHERE sender = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(sender)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MinimailError::Database(e.to_string()))?;

        Ok(messages)
    }

    /// Count total messages in the database.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(self.pool)
            .await
            .map_err(|e| MinimailError::Database(e.to_string()))?;

        Ok(count)
    }
}
