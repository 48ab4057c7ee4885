//! Comment endpoints
//!
//! - `POST /todos/:todo_id/comments` - Comment as the caller
//! - `GET /todos/:todo_id/comments` - List comments, oldest first

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdesk_shared::auth::AuthUser;
use taskdesk_shared::models::comment::CommentWithAuthor;
use taskdesk_shared::services::comment;
use validator::Validate;

use super::users::UserResponse;
use crate::{app::AppState, error::ApiResult};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserResponse,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: UserResponse::new(comment.user_id, comment.user_email),
        }
    }
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ApiResult<Json<CommentResponse>> {
    let Path(todo_id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let created = comment::add_comment(&state.db, &principal, todo_id, req.contents).await?;

    Ok(Json(created.into()))
}

pub async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let Path(todo_id) = path?;
    let comments = comment::list_comments(&state.db, todo_id).await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}
