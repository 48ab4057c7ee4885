//! Profile lookup, password change and role change

use sqlx::PgPool;
use tracing::info;

use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{DomainError, DomainResult};
use crate::models::user::{User, UserRole};

pub async fn get_user(pool: &PgPool, user_id: i64) -> DomainResult<User> {
    User::find_by_id(pool, user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))
}

/// Replaces the caller's password
///
/// Checks run in this order and the first failure wins:
///
/// 1. the new password satisfies the policy
/// 2. the user exists
/// 3. the new password differs from the current one
/// 4. the old password matches the current one
pub async fn change_password(
    pool: &PgPool,
    user_id: i64,
    old_password: &str,
    new_password: &str,
) -> DomainResult<()> {
    validate_new_password(new_password).map_err(DomainError::invalid)?;

    let user = get_user(pool, user_id).await?;

    // Users created from token claims have no password to compare against
    let current = user
        .password_hash
        .as_deref()
        .ok_or_else(|| DomainError::invalid("Current password is incorrect"))?;

    if verify_password(new_password, current)? {
        return Err(DomainError::invalid(
            "New password must differ from the current password",
        ));
    }

    if !verify_password(old_password, current)? {
        return Err(DomainError::invalid("Current password is incorrect"));
    }

    let new_hash = hash_password(new_password)?;
    User::update_password(pool, user.id, &new_hash).await?;

    info!(user_id = user.id, "Password changed");
    Ok(())
}

/// Sets a user's role; the role text is case-insensitive
pub async fn change_role(pool: &PgPool, user_id: i64, role: &str) -> DomainResult<UserRole> {
    let user = get_user(pool, user_id).await?;
    let role = UserRole::parse(role)?;

    User::update_role(pool, user.id, role).await?;

    info!(user_id = user.id, from = %user.role, to = %role, "User role changed");
    Ok(role)
}
