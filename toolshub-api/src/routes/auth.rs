/// Authentication endpoints
///
/// - `POST /api/auth/register` - Register a new account
/// - `POST /api/auth/login` - Login and get tokens
/// - `POST /api/auth/refresh` - Exchange a refresh token for an access token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use toolshub_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, Role, User},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    /// Checked for strength after the basic rules
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Login request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register and login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user_id: Uuid,
    pub role: Role,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

impl TokenResponse {
    fn issue(user: &User, secret: &str) -> ApiResult<Self> {
        let pair = jwt::issue_token_pair(user.id, user.role, secret)?;

        Ok(Self {
            user_id: user.id,
            role: user.role,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Register a new account
///
/// New accounts always get the `USER` role.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123",
///   "name": "Jane Doe"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "user_id": "uuid",
///   "role": "USER",
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.email = req.email.trim().to_string();
    req.name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    req.validate()?;

    password::validate_password_strength(&req.password)
        .map_err(|message| ApiError::invalid_field("password", message))?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            password_hash: Some(password_hash),
            role: Role::User,
        },
    )
    .await?;

    info!(user_id = %user.id, "User registered");

    Ok(Json(TokenResponse::issue(&user, state.jwt_secret())?))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Response
///
/// Same shape as registration.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown email, wrong password, or an account without
///   a password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;

    if !password::verify_password(&req.password, hash)? {
        return Err(invalid());
    }

    info!(user_id = %user.id, role = user.role.as_str(), "User logged in");

    Ok(Json(TokenResponse::issue(&user, state.jwt_secret())?))
}

/// Exchange a refresh token for a new access token
///
/// The new token carries the account's current role, so a promotion or
/// demotion takes effect on the next refresh.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/refresh
/// Content-Type: application/json
///
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token, or deleted account
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    let access_claims = jwt::Claims::new(user.id, user.role, jwt::TokenType::Access);
    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
