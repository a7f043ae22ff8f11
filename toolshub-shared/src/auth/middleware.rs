/// Bearer-token authentication for Axum
///
/// Extracts `Authorization: Bearer <token>`, validates it as an access token
/// and turns the claims into an [`AuthContext`]. The API's middleware layers
/// insert the context into request extensions, where handlers read it.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::Next, response::Response};
/// use toolshub_shared::auth::middleware::{authenticate_bearer, AuthError};
///
/// async fn require_auth(mut req: Request, next: Next) -> Result<Response, AuthError> {
///     let auth = authenticate_bearer(req.headers(), "your-jwt-secret")?;
///     req.extensions_mut().insert(auth);
///     Ok(next.run(req).await)
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, Claims, JwtError};
use crate::models::user::Role;

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Error type for authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    InvalidFormat(String),

    /// Signature, expiry, issuer or token type check failed
    InvalidToken(String),
}

impl AuthError {
    pub fn message(&self) -> &str {
        match self {
            AuthError::MissingCredentials => "Missing authorization header",
            AuthError::InvalidFormat(msg) | AuthError::InvalidToken(msg) => msg,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidFormat(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            _ => (StatusCode::UNAUTHORIZED, "unauthorized"),
        };

        let body = Json(serde_json::json!({
            "error": code,
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

/// Pulls the raw token out of `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid ASCII".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

/// Authenticates a request from its headers
pub fn authenticate_bearer(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_access_token(token, secret)?;

    Ok(AuthContext::from_claims(&claims))
}

/// Authenticates when credentials are present
///
/// No header means an anonymous caller. A header that fails validation is
/// treated as anonymous too.
pub fn authenticate_optional(headers: &HeaderMap, secret: &str) -> Option<AuthContext> {
    match authenticate_bearer(headers, secret) {
        Ok(auth) => Some(auth),
        Err(AuthError::MissingCredentials) => None,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring invalid credentials on public route");
            None
        }
    }
}
