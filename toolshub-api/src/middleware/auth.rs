/// Authentication and capability middleware
///
/// Three layers, applied per route group in [`crate::app::build_router`]:
///
/// - [`jwt_auth_layer`]: requires a valid access token, inserts `AuthContext`
/// - [`optional_auth_layer`]: inserts `AuthContext` only when a valid token is sent
/// - [`admin_guard_layer`]: requires the `ADMIN` role, both in the token and
///   on the account as currently stored
///
/// Rejections happen before the handler runs. Only a token already carrying
/// the `ADMIN` role costs a database lookup.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use toolshub_shared::{
    auth::{
        authorization::require_admin,
        middleware::{authenticate_bearer, authenticate_optional, AuthContext},
    },
    models::user::User,
};

use crate::{app::AppState, error::ApiError};

/// Requires `Authorization: Bearer <access token>`
pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate_bearer(req.headers(), state.jwt_secret())?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}

/// Identifies the caller when possible; never rejects
pub async fn optional_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(auth) = authenticate_optional(req.headers(), state.jwt_secret()) {
        req.extensions_mut().insert(auth);
    }

    next.run(req).await
}

/// Admin capability guard
///
/// Must run inside [`jwt_auth_layer`]. Non-admin callers get 401. The role is
/// re-read from the database, so a deleted or demoted administrator loses
/// access immediately rather than when the token expires.
pub async fn admin_guard_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = *req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    if let Err(err) = require_admin(&auth) {
        tracing::warn!(user_id = %auth.user_id, role = auth.role.as_str(), "Admin route refused");
        return Err(err.into());
    }

    let still_admin = User::find_by_id(&state.db, auth.user_id)
        .await?
        .is_some_and(|user| user.is_admin());

    if !still_admin {
        tracing::warn!(user_id = %auth.user_id, "Admin token for an account no longer holding ADMIN");
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}
