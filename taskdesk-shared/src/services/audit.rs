//! Audit trail writer
//!
//! Entries are committed on their own pool connection, never inside the
//! caller's transaction. An entry therefore survives a caller rollback, and
//! a failed audit write never fails the business operation.

use sqlx::PgPool;
use tracing::warn;

use crate::models::audit_log::AuditLog;

/// Writes one entry in its own transaction
pub async fn record(pool: &PgPool, action_type: &str, detail: &str) -> Result<AuditLog, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let entry = AuditLog::create(&mut *tx, action_type, Some(detail)).await?;
    tx.commit().await?;

    Ok(entry)
}

/// Like [`record`], but a failure is logged and swallowed
pub async fn record_best_effort(pool: &PgPool, action_type: &str, detail: &str) -> Option<AuditLog> {
    match record(pool, action_type, detail).await {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(action_type, error = %e, "Failed to write audit entry");
            None
        }
    }
}
