/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Emails are stored lowercase; [`normalize_email`] must be applied before
/// both storage and lookup so the uniqueness constraint is case-insensitive
/// in practice.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User account
///
/// The password is stored as an Argon2id hash, never plaintext. Convert to
/// [`PublicUser`] before serializing into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique numeric user id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address (lowercase, unique)
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// User shape safe to expose in responses (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique numeric user id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Input for creating a new user
///
/// `email` must already be normalized and `password_hash` must be an
/// Argon2id digest, not a plaintext password.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Normalized email address
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,
}

/// Lowercases and trims an email for storage and lookup
///
/// # Example
///
/// ```
/// use tasklane_shared::models::user::normalize_email;
///
/// assert_eq!(normalize_email("  ANA@EX.com "), "ana@ex.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns a database error if the email already exists (unique
    /// constraint violation) or the connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by normalized email
    ///
    /// The caller is expected to pass the output of [`normalize_email`];
    /// lookup is an exact match against the lowercase stored value.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
