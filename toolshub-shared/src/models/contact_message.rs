/// Contact messages sent by visitors
///
/// Messages are write-once from the public contact form; administrators list
/// them and flip the `read` flag.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contact_messages (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     subject VARCHAR(255) NOT NULL,
///     message TEXT NOT NULL,
///     read BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for a new contact message (already validated)
#[derive(Debug, Clone)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, read, created_at";

impl ContactMessage {
    pub async fn create(pool: &PgPool, data: CreateContactMessage) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {CONTACT_COLUMNS}"
        );

        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(data.name)
            .bind(data.email)
            .bind(data.subject)
            .bind(data.message)
            .fetch_one(pool)
            .await
    }

    /// Lists messages newest first, optionally only unread ones
    pub async fn list(pool: &PgPool, unread_only: bool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages
             WHERE ($1 = FALSE OR read = FALSE)
             ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(unread_only)
            .fetch_all(pool)
            .await
    }

    /// Marks a message as read (idempotent)
    ///
    /// Returns None if the message doesn't exist.
    pub async fn mark_read(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            "UPDATE contact_messages SET read = TRUE WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );

        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
