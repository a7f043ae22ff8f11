/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and are
/// embedded into the binary at compile time with `sqlx::migrate!`. They are
/// applied on server startup and by the integration test harness.

use sqlx::postgres::PgPool;
use tracing::{debug, info, warn};

/// Applies all pending migrations
///
/// Each migration runs in its own transaction; a failing migration is rolled
/// back and reported.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Number of successfully applied migrations
///
/// Returns 0 when the bookkeeping table has not been created yet.
pub async fn applied_migrations(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(0);
    }

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true")
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Number of migrations compiled into this build
pub fn embedded_migrations() -> usize {
    sqlx::migrate!("../migrations").iter().count()
}
