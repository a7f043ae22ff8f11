/// Vote ledger and the atomic vote toggle
///
/// One row per (user, tool); the row's existence is the vote. The tool's
/// `upvotes` column mirrors the ledger cardinality and is updated in the same
/// transaction as every insert/delete here.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE votes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     tool_id UUID NOT NULL REFERENCES tools(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT votes_user_tool_key UNIQUE (user_id, tool_id)
/// );
/// ```
///
/// # Concurrency
///
/// [`Vote::toggle`] locks the tool row (`FOR UPDATE`) before reading the
/// ledger, so concurrent toggles on the same tool run one after another and
/// each sees the previous one's committed result. The unique constraint backs
/// this up: the counter only moves when a ledger row was actually inserted or
/// deleted inside the transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Ledger row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tool_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of a toggle: the caller's new vote state and the tool's new count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub has_voted: bool,
    pub upvotes: i32,
}

impl Vote {
    /// Flips the caller's vote on a tool
    ///
    /// - No vote yet: inserts the ledger row and increments `upvotes` by 1
    /// - Vote exists: deletes the ledger row and decrements `upvotes` by 1
    ///
    /// All steps run in one transaction holding the tool row lock.
    ///
    /// # Returns
    ///
    /// The new state, or None if the tool doesn't exist (nothing is written).
    pub async fn toggle(
        pool: &PgPool,
        user_id: Uuid,
        tool_id: Uuid,
    ) -> Result<Option<VoteOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<Uuid> = sqlx::query_scalar("SELECT id FROM tools WHERE id = $1 FOR UPDATE")
            .bind(tool_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM votes WHERE user_id = $1 AND tool_id = $2")
            .bind(user_id)
            .bind(tool_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (has_voted, delta) = if removed > 0 {
            (false, -1)
        } else {
            let inserted = sqlx::query(
                r#"
                INSERT INTO votes (user_id, tool_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, tool_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(tool_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            (true, if inserted > 0 { 1 } else { 0 })
        };

        let upvotes: i32 = sqlx::query_scalar(
            "UPDATE tools SET upvotes = upvotes + $2 WHERE id = $1 RETURNING upvotes",
        )
        .bind(tool_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            user_id = %user_id,
            tool_id = %tool_id,
            has_voted,
            upvotes,
            "Vote toggled"
        );

        Ok(Some(VoteOutcome { has_voted, upvotes }))
    }

    /// Checks if a user has voted for a tool
    pub async fn exists(pool: &PgPool, user_id: Uuid, tool_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM votes WHERE user_id = $1 AND tool_id = $2)",
        )
        .bind(user_id)
        .bind(tool_id)
        .fetch_one(pool)
        .await
    }

    /// Counts ledger rows for a tool
    pub async fn count_for_tool(pool: &PgPool, tool_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE tool_id = $1")
            .bind(tool_id)
            .fetch_one(pool)
            .await
    }

    /// Lists tools whose counter disagrees with the ledger
    ///
    /// Returns `(tool_id, counter, ledger_count)` triples; empty when consistent.
    pub async fn find_counter_drift(pool: &PgPool) -> Result<Vec<(Uuid, i32, i64)>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT t.id, t.upvotes, COUNT(v.id) AS ledger_count
            FROM tools t
            LEFT JOIN votes v ON v.tool_id = t.id
            GROUP BY t.id
            HAVING t.upvotes <> COUNT(v.id)
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
