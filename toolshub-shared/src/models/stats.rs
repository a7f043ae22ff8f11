/// Aggregate counts for the admin dashboard

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_tools: i64,
    pub pending_tools: i64,
    pub total_messages: i64,
    pub unread_messages: i64,
    pub total_upvotes: i64,
}

impl DashboardStats {
    /// Collects all dashboard counters in one round trip
    pub async fn collect(pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM tools) AS total_tools,
                (SELECT COUNT(*) FROM tools WHERE NOT is_approved) AS pending_tools,
                (SELECT COUNT(*) FROM contact_messages) AS total_messages,
                (SELECT COUNT(*) FROM contact_messages WHERE NOT read) AS unread_messages,
                (SELECT COALESCE(SUM(upvotes), 0)::BIGINT FROM tools) AS total_upvotes
            "#,
        )
        .fetch_one(pool)
        .await
    }
}
