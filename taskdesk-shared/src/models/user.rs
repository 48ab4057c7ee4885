//! User model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id BIGSERIAL PRIMARY KEY,
//!     email VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255),
//!     nickname VARCHAR(100) NOT NULL,
//!     role VARCHAR(16) NOT NULL CHECK (role IN ('ADMIN', 'USER')),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! `password_hash` is NULL for users created on the fly from token claims.
//! Such users cannot sign in until they set a password through signup.
//!
//! Query functions take any `PgExecutor`, so they run against the pool or
//! inside a transaction (`&mut *tx`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Access role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    User,
}

/// Role text that is neither ADMIN nor USER
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid user role: {0}")]
pub struct InvalidRole(pub String);

impl UserRole {
    /// Case-insensitive parse: `"admin"`, `"Admin"` and `"ADMIN"` all work
    pub fn parse(value: &str) -> Result<Self, InvalidRole> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "USER" => Ok(UserRole::User),
            _ => Err(InvalidRole(value.to_string())),
        }
    }

    /// Canonical stored form
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::parse(s)
    }
}

impl TryFrom<String> for UserRole {
    type Error = InvalidRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserRole::parse(&value)
    }
}

/// User account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,

    /// Unique login name
    pub email: String,

    /// Argon2id hash; `None` for users created from token claims
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub nickname: String,

    #[sqlx(try_from = "String")]
    pub role: UserRole,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,

    /// Already hashed, never plaintext
    pub password_hash: Option<String>,

    pub nickname: String,

    pub role: UserRole,
}

impl User {
    /// Inserts a user and returns the stored row
    ///
    /// # Errors
    ///
    /// Fails with a unique violation if the email is taken.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, nickname, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, nickname, role, created_at, modified_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.nickname)
        .bind(data.role.as_str())
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nickname, role, created_at, modified_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Exact, case-sensitive email lookup
    pub async fn find_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nickname, role, created_at, modified_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await
    }

    pub async fn exists_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(executor)
            .await
    }

    /// Replaces the password hash; returns false if the user does not exist
    pub async fn update_password<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, modified_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets the role; returns false if the user does not exist
    pub async fn update_role<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        role: UserRole,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET role = $2, modified_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
