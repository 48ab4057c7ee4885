//! Todo model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE todos (
//!     id BIGSERIAL PRIMARY KEY,
//!     title VARCHAR(255) NOT NULL,
//!     contents TEXT NOT NULL,
//!     weather VARCHAR(100) NOT NULL,
//!     user_id BIGINT NOT NULL REFERENCES users(id),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! Filtered listing and search live in [`crate::query::todo_query`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

/// Todo item owned by its author
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,

    pub title: String,

    pub contents: String,

    /// Weather label captured when the todo was created
    pub weather: String,

    /// Author; the only user allowed to manage the todo's managers
    pub user_id: i64,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}

/// Todo joined with its author's identity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TodoWithAuthor {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_email: String,
}

impl Todo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        data: CreateTodo,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, contents, weather, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, contents, weather, user_id, created_at, modified_at
            "#,
        )
        .bind(data.title)
        .bind(data.contents)
        .bind(data.weather)
        .bind(data.user_id)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, contents, weather, user_id, created_at, modified_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Loads a todo together with its author's id and email
    pub async fn find_with_author<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<TodoWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, TodoWithAuthor>(
            r#"
            SELECT t.id, t.title, t.contents, t.weather, t.created_at, t.modified_at,
                   u.id AS user_id, u.email AS user_email
            FROM todos t
            JOIN users u ON u.id = t.user_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
