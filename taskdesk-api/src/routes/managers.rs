//! Todo manager endpoints
//!
//! - `POST /todos/:todo_id/managers` - Register a manager (201)
//! - `GET /todos/:todo_id/managers` - List managers
//! - `DELETE /todos/:todo_id/managers/:manager_id` - Remove a manager (author only)
//!
//! Every registration attempt is written to the audit log, even one that
//! fails afterwards.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdesk_shared::auth::AuthUser;
use taskdesk_shared::models::manager::ManagerWithUser;
use taskdesk_shared::services::manager;

use super::users::UserResponse;
use crate::{app::AppState, error::ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManagerRequest {
    pub manager_user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserResponse,
}

impl From<ManagerWithUser> for ManagerResponse {
    fn from(manager: ManagerWithUser) -> Self {
        Self {
            id: manager.id,
            user: UserResponse::new(manager.user_id, manager.user_email),
        }
    }
}

/// Register a user as manager of a todo
///
/// # Errors
///
/// - `400 Bad Request`: Todo or user does not exist
pub async fn create_manager(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateManagerRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ManagerResponse>)> {
    let Path(todo_id) = path?;
    let Json(req) = payload?;

    let created = manager::add_manager(&state.db, &principal, todo_id, req.manager_user_id).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_managers(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<ManagerResponse>>> {
    let Path(todo_id) = path?;
    let managers = manager::list_managers(&state.db, todo_id).await?;

    Ok(Json(managers.into_iter().map(ManagerResponse::from).collect()))
}

/// Remove a manager from a todo
///
/// # Errors
///
/// - `400 Bad Request`: Todo or manager missing, caller is not the todo's
///   author, or the manager belongs to another todo
pub async fn delete_manager(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((todo_id, manager_id)) = path?;

    manager::delete_manager(&state.db, &principal, todo_id, manager_id).await?;

    Ok(StatusCode::OK)
}
