//! Manager model and database operations
//!
//! A manager row links a user to a todo as a collaborator. Only the todo's
//! author may remove one (enforced in `services::manager`).

use serde::Serialize;
use sqlx::PgExecutor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Manager {
    pub id: i64,
    pub user_id: i64,
    pub todo_id: i64,
}

/// Manager joined with the managing user's identity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ManagerWithUser {
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
}

impl Manager {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        todo_id: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (user_id, todo_id)
            VALUES ($1, $2)
            RETURNING id, user_id, todo_id
            "#,
        )
        .bind(user_id)
        .bind(todo_id)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Manager>("SELECT id, user_id, todo_id FROM managers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Managers of a todo in insertion order
    pub async fn list_by_todo<'e, E: PgExecutor<'e>>(
        executor: E,
        todo_id: i64,
    ) -> Result<Vec<ManagerWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ManagerWithUser>(
            r#"
            SELECT m.id, u.id AS user_id, u.email AS user_email
            FROM managers m
            JOIN users u ON u.id = m.user_id
            WHERE m.todo_id = $1
            ORDER BY m.id ASC
            "#,
        )
        .bind(todo_id)
        .fetch_all(executor)
        .await
    }

    /// Returns true if a row was removed
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
