//! Authentication endpoints
//!
//! - `POST /auth/signup` - Register and receive a token
//! - `POST /auth/signin` - Exchange credentials for a token

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use taskdesk_shared::services::auth::{self, SignupInput};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Nickname must be 1 to 100 characters"))]
    pub nickname: String,

    /// `ADMIN` or `USER`, any case
    #[serde(alias = "role")]
    #[validate(length(min = 1, message = "User role is required"))]
    pub user_role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// `"Bearer <jwt>"`
    pub bearer_token: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub bearer_token: String,
    pub nickname: String,
}

/// Register a new user
///
/// ```text
/// POST /auth/signup
///
/// { "email": "kim@example.com", "password": "pw", "nickname": "kim", "userRole": "USER" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, email taken or unknown role
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<SignupResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let created = auth::signup(
        &state.db,
        &state.tokens,
        SignupInput {
            email: req.email,
            password: req.password,
            nickname: req.nickname,
            role: req.user_role,
        },
    )
    .await?;

    Ok(Json(SignupResponse {
        bearer_token: created.bearer_token(),
    }))
}

/// Sign in with email and password
///
/// The token is returned in the body and in the `Authorization` response
/// header.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    req.validate()?;

    let signed_in = auth::signin(&state.db, &state.tokens, &req.email, &req.password).await?;

    let bearer = signed_in.bearer_token();
    let header_value =
        HeaderValue::from_str(&bearer).map_err(|e| ApiError::ServerError(e.to_string()))?;

    Ok((
        [(header::AUTHORIZATION, header_value)],
        Json(SigninResponse {
            bearer_token: bearer,
            nickname: signed_in.user.nickname,
        }),
    ))
}
