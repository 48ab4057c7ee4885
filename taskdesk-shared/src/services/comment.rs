//! Comments on todos

use sqlx::PgPool;

use crate::auth::AuthUser;
use crate::error::{DomainError, DomainResult};
use crate::models::comment::{Comment, CommentWithAuthor, CreateComment};
use crate::models::todo::Todo;

/// Adds a comment authored by the principal
pub async fn add_comment(
    pool: &PgPool,
    principal: &AuthUser,
    todo_id: i64,
    contents: String,
) -> DomainResult<CommentWithAuthor> {
    let todo = Todo::find_by_id(pool, todo_id)
        .await?
        .ok_or(DomainError::NotFound("Todo"))?;

    let comment = Comment::create(
        pool,
        CreateComment {
            contents,
            user_id: principal.id,
            todo_id: todo.id,
        },
    )
    .await?;

    tracing::debug!(comment_id = comment.id, todo_id = todo.id, "Comment added");

    Ok(CommentWithAuthor {
        id: comment.id,
        contents: comment.contents,
        user_id: principal.id,
        user_email: principal.email.clone(),
    })
}

/// Comments of a todo, oldest first
pub async fn list_comments(pool: &PgPool, todo_id: i64) -> DomainResult<Vec<CommentWithAuthor>> {
    if Todo::find_by_id(pool, todo_id).await?.is_none() {
        return Err(DomainError::NotFound("Todo"));
    }

    Ok(Comment::list_by_todo(pool, todo_id).await?)
}
