//! Todo managers
//!
//! Any member may register a manager on any todo; only the todo's author may
//! remove one. Every registration leaves a `MANAGER_REGISTRATION` audit entry
//! that is committed independently of the registration itself.

use sqlx::PgPool;
use tracing::info;

use crate::auth::authorization::require_ownership;
use crate::auth::AuthUser;
use crate::error::{DomainError, DomainResult};
use crate::models::audit_log::MANAGER_REGISTRATION;
use crate::models::manager::{Manager, ManagerWithUser};
use crate::models::todo::Todo;
use crate::models::user::User;
use crate::services::audit;

/// Registers `manager_user_id` as a manager of the todo
///
/// The audit entry is committed after both references are found and before
/// the manager row is inserted, so a failed insert still leaves the entry.
/// No step holds a connection while another is acquired.
pub async fn add_manager(
    pool: &PgPool,
    principal: &AuthUser,
    todo_id: i64,
    manager_user_id: i64,
) -> DomainResult<ManagerWithUser> {
    let todo = Todo::find_by_id(pool, todo_id)
        .await?
        .ok_or(DomainError::NotFound("Todo"))?;

    let user = User::find_by_id(pool, manager_user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    let detail = format!(
        "Manager registration requested by user {}: user {} on todo {}",
        principal.id, user.id, todo.id
    );
    audit::record_best_effort(pool, MANAGER_REGISTRATION, &detail).await;

    let manager = Manager::create(pool, user.id, todo.id).await?;

    info!(manager_id = manager.id, todo_id = todo.id, user_id = user.id, "Manager registered");

    Ok(ManagerWithUser {
        id: manager.id,
        user_id: user.id,
        user_email: user.email,
    })
}

pub async fn list_managers(pool: &PgPool, todo_id: i64) -> DomainResult<Vec<ManagerWithUser>> {
    if Todo::find_by_id(pool, todo_id).await?.is_none() {
        return Err(DomainError::NotFound("Todo"));
    }

    Ok(Manager::list_by_todo(pool, todo_id).await?)
}

/// Removes a manager; only the todo's author may do this
///
/// Checks run in this order and the first failure wins:
///
/// 1. the todo exists
/// 2. the principal authored it
/// 3. the manager exists
/// 4. the manager belongs to this todo
pub async fn delete_manager(
    pool: &PgPool,
    principal: &AuthUser,
    todo_id: i64,
    manager_id: i64,
) -> DomainResult<()> {
    let todo = Todo::find_by_id(pool, todo_id)
        .await?
        .ok_or(DomainError::NotFound("Todo"))?;

    require_ownership(principal, todo.user_id).map_err(|_| DomainError::NotTodoOwner)?;

    let manager = Manager::find_by_id(pool, manager_id)
        .await?
        .ok_or(DomainError::NotFound("Manager"))?;

    if manager.todo_id != todo.id {
        return Err(DomainError::ManagerTodoMismatch {
            manager_id: manager.id,
            todo_id: todo.id,
        });
    }

    Manager::delete(pool, manager.id).await?;

    info!(manager_id = manager.id, todo_id = todo.id, "Manager removed");
    Ok(())
}
