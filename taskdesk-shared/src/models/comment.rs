//! Comment model and database operations
//!
//! Comments belong to exactly one todo and are removed with it
//! (`ON DELETE CASCADE`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub contents: String,
    pub user_id: i64,
    pub todo_id: i64,
}

/// Comment joined with its author's identity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub contents: String,
    pub user_id: i64,
    pub user_email: String,
}

impl Comment {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        data: CreateComment,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (contents, user_id, todo_id)
            VALUES ($1, $2, $3)
            RETURNING id, contents, user_id, todo_id, created_at, modified_at
            "#,
        )
        .bind(data.contents)
        .bind(data.user_id)
        .bind(data.todo_id)
        .fetch_one(executor)
        .await
    }

    /// All comments of a todo, oldest first
    pub async fn list_by_todo<'e, E: PgExecutor<'e>>(
        executor: E,
        todo_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.contents, u.id AS user_id, u.email AS user_email
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.todo_id = $1
            ORDER BY c.id ASC
            "#,
        )
        .bind(todo_id)
        .fetch_all(executor)
        .await
    }
}
