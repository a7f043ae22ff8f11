/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use toolshub_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = toolshub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::auth::{admin_guard_layer, jwt_auth_layer, optional_auth_layer},
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                          # public
/// └── /api/
///     ├── /auth/                            # public
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── GET  /tools                       # public
///     ├── POST /tools                       # user
///     ├── GET  /tools/:id                   # optional auth
///     ├── POST /tools/:id/vote              # user
///     ├── POST /contact                     # public
///     └── /admin/                           # ADMIN
///         ├── GET  /tools?status=
///         ├── POST /tools/:id/approve
///         ├── GET  /stats
///         ├── GET  /messages?unread=
///         └── POST /messages/:id/read
/// ```
///
/// # Middleware Stack
///
/// 1. Authentication / admin guard (per route group, as route layers)
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
pub fn build_router(state: AppState) -> Router {
    let require_user = from_fn_with_state(state.clone(), jwt_auth_layer);
    let identify_user = from_fn_with_state(state.clone(), optional_auth_layer);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let tool_routes = Router::new()
        .route(
            "/",
            get(routes::tools::list_tools)
                .merge(post(routes::tools::submit_tool).route_layer(require_user.clone())),
        )
        .route(
            "/:id",
            get(routes::tools::get_tool).route_layer(identify_user),
        )
        .route(
            "/:id/vote",
            post(routes::tools::toggle_vote).route_layer(require_user.clone()),
        );

    let contact_routes = Router::new().route("/", post(routes::contact::submit_contact));

    // Guard runs after authentication (layers wrap outward)
    let admin_routes = Router::new()
        .route("/tools", get(routes::admin::list_tools))
        .route("/tools/:id/approve", post(routes::admin::approve_tool))
        .route("/stats", get(routes::admin::stats))
        .route("/messages", get(routes::admin::list_messages))
        .route("/messages/:id/read", post(routes::admin::mark_message_read))
        .route_layer(from_fn_with_state(state.clone(), admin_guard_layer))
        .route_layer(require_user);

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tools", tool_routes)
        .nest("/contact", contact_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(cors_layer(&state.config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
