//! Error handling for the API server
//!
//! Handlers return [`ApiResult`]. Every failure, whether from a service, from
//! request validation or from a malformed body, ends up as one [`ApiError`]
//! and is rendered as the uniform body:
//!
//! ```json
//! { "status": "BAD_REQUEST", "code": 400, "message": "Todo not found" }
//! ```
//!
//! Token and role failures never reach a handler: the gate and the policy
//! middleware in `taskdesk_shared::auth` render the same body themselves
//! (401 and 403).

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskdesk_shared::error::{DomainError, ErrorBody};
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad input, missing entity or violated business rule (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bad credentials (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Downstream or internal failure (500); the detail is logged, not returned
    #[error("Server error: {0}")]
    ServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::InvalidRequest(msg) | ApiError::Unauthorized(msg) => msg,
            ApiError::ServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with a server error");
                "Internal server error".to_string()
            }
        };

        ErrorBody::new(status, message).into_response_with(status)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.status_code() {
            StatusCode::BAD_REQUEST => ApiError::InvalidRequest(err.to_string()),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(err.to_string()),
            _ => ApiError::ServerError(err.to_string()),
        }
    }
}

/// Flattens field errors into `field: message` pairs, sorted by field
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let text = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    format!("{}: {}", field, text)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        ApiError::InvalidRequest(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
