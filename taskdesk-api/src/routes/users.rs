//! User endpoints
//!
//! - `GET /users/:user_id` - Look up a user
//! - `PUT /users` - Change the caller's own password

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
use taskdesk_shared::models::user::User;
use taskdesk_shared::services::user;
use validator::Validate;

use crate::{app::AppState, error::ApiResult};

/// Minimal user view embedded in todo, comment and manager responses
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl UserResponse {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::new(user.id, user.email)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    /// Policy (length, digit, uppercase) is checked by the service
    pub new_password: String,
}

/// Get a user by id
///
/// # Errors
///
/// - `400 Bad Request`: No such user
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(user_id) = path?;
    let found = user::get_user(&state.db, user_id).await?;

    Ok(Json(found.into()))
}

/// Change the authenticated user's password
///
/// # Errors
///
/// - `400 Bad Request`: Weak new password, same as the old one, or wrong
///   old password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = payload?;
    req.validate()?;

    user::change_password(&state.db, principal.id, &req.old_password, &req.new_password).await?;

    Ok(StatusCode::OK)
}
