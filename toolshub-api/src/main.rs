//! # ToolsHub API Server
//!
//! Serves the ToolsHub directory API: tool listing and search, submissions,
//! the vote toggle, the contact form and the admin moderation endpoints.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment (`.env` supported)
//! 2. Initialize tracing (`LOG_FORMAT=json` for JSON lines)
//! 3. Connect the database pool and run embedded migrations
//! 4. Ensure the configured administrator account exists
//! 5. Serve until Ctrl-C / SIGTERM, then close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p toolshub-api
//! ```

use anyhow::Context;
use toolshub_api::{
    app::{build_router, AppState},
    config::{AdminConfig, Config, LogFormat},
};
use toolshub_shared::{
    auth::password,
    db::{migrations, pool},
    models::user::User,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!(
        "ToolsHub API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if config.api.production && config.allows_any_origin() {
        tracing::warn!("CORS allows any origin in production; set CORS_ORIGINS");
    }

    let db = pool::create_pool(pool::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await
    .context("Failed to connect to database")?;

    migrations::run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    if let Some(admin) = &config.admin {
        bootstrap_admin(&db, admin).await?;
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "toolshub_api=debug,toolshub_shared=info,tower_http=debug".into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

/// Creates or promotes the configured administrator
async fn bootstrap_admin(db: &sqlx::PgPool, admin: &AdminConfig) -> anyhow::Result<()> {
    let password_hash = password::hash_password(&admin.password)?;

    let user = User::ensure_admin(db, &admin.email, admin.name.clone(), password_hash)
        .await
        .context("Failed to ensure administrator account")?;

    tracing::info!(user_id = %user.id, email = %user.email, "Administrator account ready");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
