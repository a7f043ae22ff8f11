/// User model and database operations
///
/// Users either sign in with credentials (Argon2id password hash) or come from a
/// social identity provider, in which case `password_hash` is NULL and
/// credential login is refused.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('USER', 'ADMIN');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL,          -- unique, case-insensitive
///     name VARCHAR(255),
///     password_hash VARCHAR(255),
///     role user_role NOT NULL DEFAULT 'USER',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use toolshub_shared::models::user::{CreateUser, Role, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     name: Some("Jane Doe".to_string()),
///     password_hash: Some("$argon2id$...".to_string()),
///     role: Role::User,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "USER@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account role
///
/// Ordering: Admin > User. Only admins may moderate tools and read the inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account: browse, submit, vote
    #[default]
    User,

    /// Moderator: approve tools, read contact messages
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Checks if this role satisfies the required role
    pub fn has_permission(&self, required: &Role) -> bool {
        self.permission_level() >= required.permission_level()
    }

    fn permission_level(&self) -> u8 {
        match self {
            Role::Admin => 2,
            Role::User => 1,
        }
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Unique (case-insensitive) email address
    pub email: String,

    pub name: Option<String>,

    /// Argon2id hash; None for social-identity-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
    /// Argon2id hash (NOT the plaintext password)
    pub password_hash: Option<String>,
    pub role: Role,
}

const USER_COLUMNS: &str = "id, email, name, password_hash, role, created_at, updated_at";

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique violation on `users_email_key` when the email is taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (email, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(data.email.trim())
            .bind(data.name)
            .bind(data.password_hash)
            .bind(data.role)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by email address (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");

        sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Ensures an administrator account exists for `email`
    ///
    /// Creates the account when missing. An existing account is promoted to
    /// `ADMIN`; its password is only set if it had none.
    pub async fn ensure_admin(
        pool: &PgPool,
        email: &str,
        name: Option<String>,
        password_hash: String,
    ) -> Result<Self, sqlx::Error> {
        if let Some(existing) = Self::find_by_email(pool, email).await? {
            let sql = format!(
                "UPDATE users
                 SET role = 'ADMIN',
                     password_hash = COALESCE(password_hash, $2),
                     updated_at = NOW()
                 WHERE id = $1
                 RETURNING {USER_COLUMNS}"
            );

            return sqlx::query_as::<_, User>(&sql)
                .bind(existing.id)
                .bind(password_hash)
                .fetch_one(pool)
                .await;
        }

        Self::create(
            pool,
            CreateUser {
                email: email.to_string(),
                name,
                password_hash: Some(password_hash),
                role: Role::Admin,
            },
        )
        .await
    }

    /// Deletes a user; their votes cascade, their submissions are orphaned
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
