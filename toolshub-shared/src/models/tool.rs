/// Tool model, category tags and the publication state machine
///
/// A tool is submitted as `Pending` and becomes publicly listed once an
/// administrator approves it. `upvotes` is a denormalized copy of the vote
/// ledger's cardinality for the tool; it is only ever changed by
/// [`Vote::toggle`](super::vote::Vote::toggle) inside the same transaction as
/// the ledger row.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE pricing_tier AS ENUM ('FREE', 'PAID', 'FREEMIUM');
///
/// CREATE TABLE tools (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(100) NOT NULL,
///     description TEXT NOT NULL,
///     url VARCHAR(2048) NOT NULL,
///     image_url VARCHAR(2048),
///     pricing pricing_tier NOT NULL DEFAULT 'FREE',
///     is_approved BOOLEAN NOT NULL DEFAULT FALSE,
///     upvotes INTEGER NOT NULL DEFAULT 0 CHECK (upvotes >= 0),
///     submitted_by UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE categories (id UUID PRIMARY KEY, name VARCHAR(64) NOT NULL UNIQUE);
/// CREATE TABLE tool_categories (tool_id UUID, category_id UUID, PRIMARY KEY (tool_id, category_id));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Pricing tier of a tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pricing_tier", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Pricing {
    #[default]
    Free,
    Paid,
    Freemium,
}

/// Publication status of a tool
///
/// # State Machine
///
/// ```text
/// Pending ──approve──> Approved
/// ```
///
/// `Approved` is terminal. Approving an approved tool is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Pending,
    Approved,
}

impl PublicationStatus {
    pub fn from_approved(is_approved: bool) -> Self {
        if is_approved {
            PublicationStatus::Approved
        } else {
            PublicationStatus::Pending
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PublicationStatus::Approved)
    }
}

/// Tool listing with its category names
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    /// Destination URL
    pub url: String,

    /// Image reference (hosted elsewhere)
    pub image_url: Option<String>,

    pub pricing: Pricing,
    pub is_approved: bool,

    /// Denormalized vote count; always equals the number of ledger rows
    pub upvotes: i32,

    /// Submitting user (None once the account is deleted)
    pub submitted_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    /// Category names, sorted
    pub categories: Vec<String>,
}

impl Tool {
    pub fn status(&self) -> PublicationStatus {
        PublicationStatus::from_approved(self.is_approved)
    }
}

/// Tool row as shown on the moderation screen
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModerationTool {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tool: Tool,

    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,

    /// Ledger count, independent of the denormalized counter
    pub vote_count: i64,
}

/// Input for submitting a new tool
#[derive(Debug, Clone)]
pub struct CreateTool {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub pricing: Pricing,
    pub categories: Vec<String>,
    pub submitted_by: Option<Uuid>,
}

/// Search over approved tools
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Case-insensitive substring of title or description
    pub query: Option<String>,

    /// Exact category name
    pub category: Option<String>,
}

/// Moderation list filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl ModerationFilter {
    fn approved_flag(&self) -> Option<bool> {
        match self {
            ModerationFilter::All => None,
            ModerationFilter::Pending => Some(false),
            ModerationFilter::Approved => Some(true),
        }
    }
}

const TOOL_COLUMNS: &str = r#"
    t.id, t.title, t.description, t.url, t.image_url, t.pricing, t.is_approved,
    t.upvotes, t.submitted_by, t.created_at,
    COALESCE(
        ARRAY_AGG(c.name::TEXT ORDER BY c.name) FILTER (WHERE c.name IS NOT NULL),
        '{}'::TEXT[]
    ) AS categories
"#;

const CATEGORY_JOINS: &str = r#"
    LEFT JOIN tool_categories tc ON tc.tool_id = t.id
    LEFT JOIN categories c ON c.id = tc.category_id
"#;

/// Normalizes a category name to its stored form (`image generation` -> `IMAGE_GENERATION`)
pub fn normalize_category(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace('-', "_")
        .to_uppercase()
}

/// Builds an ILIKE pattern matching `query` as a literal substring
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl Tool {
    /// Submits a new tool in the `Pending` state
    ///
    /// Category rows are created on first use. The tool, its categories and
    /// the links are written in one transaction.
    pub async fn create(pool: &PgPool, data: CreateTool) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let tool_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO tools (title, description, url, image_url, pricing, submitted_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.url)
        .bind(&data.image_url)
        .bind(data.pricing)
        .bind(data.submitted_by)
        .fetch_one(&mut *tx)
        .await?;

        let mut names: Vec<String> = data
            .categories
            .iter()
            .map(|name| normalize_category(name))
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();

        for name in &names {
            let category_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO categories (name) VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("INSERT INTO tool_categories (tool_id, category_id) VALUES ($1, $2)")
                .bind(tool_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(tool_id = %tool_id, categories = names.len(), "Tool submitted for review");

        Self::find_by_id(pool, tool_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Finds a tool by ID regardless of its publication status
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {TOOL_COLUMNS} FROM tools t {CATEGORY_JOINS}
             WHERE t.id = $1
             GROUP BY t.id"
        );

        sqlx::query_as::<_, Tool>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists approved tools, most upvoted first
    pub async fn list_approved(pool: &PgPool, filter: &ToolFilter) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);
        let category = filter
            .category
            .as_deref()
            .map(normalize_category)
            .filter(|c| !c.is_empty());

        let sql = format!(
            "SELECT {TOOL_COLUMNS} FROM tools t {CATEGORY_JOINS}
             WHERE t.is_approved = TRUE
               AND ($1::TEXT IS NULL OR t.title ILIKE $1 OR t.description ILIKE $1)
               AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM tool_categories ftc
                    JOIN categories fc ON fc.id = ftc.category_id
                    WHERE ftc.tool_id = t.id AND fc.name = $2
               ))
             GROUP BY t.id
             ORDER BY t.upvotes DESC, t.created_at DESC"
        );

        sqlx::query_as::<_, Tool>(&sql)
            .bind(pattern)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Lists tools for moderation, newest first
    pub async fn list_for_moderation(
        pool: &PgPool,
        filter: ModerationFilter,
    ) -> Result<Vec<ModerationTool>, sqlx::Error> {
        let sql = format!(
            "SELECT {TOOL_COLUMNS},
                    u.name AS submitter_name,
                    u.email AS submitter_email,
                    (SELECT COUNT(*) FROM votes v WHERE v.tool_id = t.id) AS vote_count
             FROM tools t {CATEGORY_JOINS}
             LEFT JOIN users u ON u.id = t.submitted_by
             WHERE ($1::BOOLEAN IS NULL OR t.is_approved = $1)
             GROUP BY t.id, u.id
             ORDER BY t.created_at DESC"
        );

        sqlx::query_as::<_, ModerationTool>(&sql)
            .bind(filter.approved_flag())
            .fetch_all(pool)
            .await
    }

    /// Approves a tool (`Pending -> Approved`)
    ///
    /// Idempotent: approving an approved tool returns it unchanged.
    /// Returns None if the tool doesn't exist. Callers are responsible for the
    /// ADMIN capability check.
    pub async fn approve(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            "WITH t AS (
                UPDATE tools SET is_approved = TRUE WHERE id = $1 RETURNING *
             )
             SELECT {TOOL_COLUMNS} FROM t {CATEGORY_JOINS}
             GROUP BY t.id, t.title, t.description, t.url, t.image_url, t.pricing,
                      t.is_approved, t.upvotes, t.submitted_by, t.created_at"
        );

        let tool = sqlx::query_as::<_, Tool>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        if let Some(ref tool) = tool {
            info!(tool_id = %tool.id, "Tool approved");
        }

        Ok(tool)
    }

    /// Deletes a tool together with its votes and category links
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
