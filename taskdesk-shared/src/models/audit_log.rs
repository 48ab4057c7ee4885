//! Audit log model
//!
//! Append-only. Entries carry no foreign keys, so they outlive the users and
//! todos they mention. Writes go through `services::audit`, which commits them
//! independently of the caller's transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

/// A manager was attached to a todo
pub const MANAGER_REGISTRATION: &str = "MANAGER_REGISTRATION";

/// An admin endpoint was invoked
pub const ADMIN_ACCESS: &str = "ADMIN_ACCESS";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuditLog {
    pub id: i64,

    /// Free text; see the constants in this module
    pub action_type: String,

    pub action_detail: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        action_type: &str,
        action_detail: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (action_type, action_detail)
            VALUES ($1, $2)
            RETURNING id, action_type, action_detail, created_at
            "#,
        )
        .bind(action_type)
        .bind(action_detail)
        .fetch_one(executor)
        .await
    }

    /// Most recent entries of one action type, newest first
    pub async fn list_by_action<'e, E: PgExecutor<'e>>(
        executor: E,
        action_type: &str,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, action_type, action_detail, created_at
            FROM audit_logs
            WHERE action_type = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(action_type)
        .bind(limit)
        .fetch_all(executor)
        .await
    }
}
