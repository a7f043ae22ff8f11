/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength rules
/// - [`jwt`]: Access/refresh token issuing and validation (HS256)
/// - [`middleware`]: Bearer-token authentication into an [`middleware::AuthContext`]
/// - [`authorization`]: Role guard applied before every privileged operation
///
/// # Example
///
/// ```no_run
/// use toolshub_shared::auth::{jwt, password};
/// use toolshub_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = password::hash_password("S3cure!pass")?;
/// assert!(password::verify_password("S3cure!pass", &hash)?);
///
/// let claims = jwt::Claims::new(Uuid::new_v4(), Role::User, jwt::TokenType::Access);
/// let token = jwt::create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
