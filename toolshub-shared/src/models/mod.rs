/// Database models for ToolsHub
///
/// # Models
///
/// - `user`: Accounts and roles
/// - `tool`: Tool listings, category tags and the publication state machine
/// - `vote`: The vote ledger and the atomic toggle
/// - `contact_message`: Visitor messages for the admin inbox
/// - `stats`: Aggregate counts for the admin dashboard
///
/// # Example
///
/// ```no_run
/// use toolshub_shared::models::vote::Vote;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid, tool_id: Uuid) -> Result<(), sqlx::Error> {
/// if let Some(outcome) = Vote::toggle(&pool, user_id, tool_id).await? {
///     println!("voted={} upvotes={}", outcome.has_voted, outcome.upvotes);
/// }
/// # Ok(())
/// # }
/// ```

pub mod contact_message;
pub mod stats;
pub mod tool;
pub mod user;
pub mod vote;
