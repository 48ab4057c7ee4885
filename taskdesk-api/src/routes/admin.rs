//! Admin endpoints
//!
//! Reachable only with the ADMIN role; every request is access-logged by
//! [`crate::middleware::admin_log`].
//!
//! - `PATCH /admin/users/:user_id` - Change a user's role

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskdesk_shared::services::user;
use validator::Validate;

use crate::{app::AppState, error::ApiResult};

#[derive(Debug, Deserialize, Validate)]
pub struct UserRoleChangeRequest {
    /// `ADMIN` or `USER`, any case
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Change a user's role
///
/// # Errors
///
/// - `400 Bad Request`: No such user or unknown role
pub async fn change_user_role(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserRoleChangeRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(user_id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    user::change_role(&state.db, user_id, &req.role).await?;

    Ok(StatusCode::OK)
}
