//! Domain errors and the uniform error body
//!
//! Every service operation returns [`DomainResult`]. The API crate maps each
//! [`DomainError`] variant to an HTTP status and renders it as an
//! [`ErrorBody`]:
//!
//! ```json
//! { "status": "BAD_REQUEST", "code": 400, "message": "Todo not found" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::models::user::InvalidRole;
use crate::weather::WeatherError;

/// Error type for service operations
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Bad input or a violated business rule
    #[error("{0}")]
    InvalidRequest(String),

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller is not the author of the todo
    #[error("Only the author of the todo can manage its managers")]
    NotTodoOwner,

    /// Manager exists but is attached to a different todo
    #[error("Manager {manager_id} is not assigned to todo {todo_id}")]
    ManagerTodoMismatch { manager_id: i64, todo_id: i64 },

    /// Bad credentials at signin
    #[error("{0}")]
    AuthFailure(String),

    #[error("Weather lookup failed: {0}")]
    Weather(#[from] WeatherError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Token operation failed: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidRequest(message.into())
    }

    /// HTTP status for this error
    ///
    /// Business-rule violations are client errors, bad credentials are 401,
    /// and infrastructure failures are 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::InvalidRequest(_)
            | DomainError::NotFound(_)
            | DomainError::NotTodoOwner
            | DomainError::ManagerTodoMismatch { .. } => StatusCode::BAD_REQUEST,
            DomainError::AuthFailure(_) => StatusCode::UNAUTHORIZED,
            DomainError::Weather(_)
            | DomainError::Password(_)
            | DomainError::Token(_)
            | DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<InvalidRole> for DomainError {
    fn from(err: InvalidRole) -> Self {
        DomainError::InvalidRequest(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// JSON body returned for every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Status name, e.g. `BAD_REQUEST`
    pub status: String,

    /// Numeric HTTP status
    pub code: u16,

    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status_name(status),
            code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Renders the body with its own status code
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// `Internal Server Error` becomes `INTERNAL_SERVER_ERROR`
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(status_name(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(status_name(StatusCode::UNAUTHORIZED), "UNAUTHORIZED");
        assert_eq!(status_name(StatusCode::FORBIDDEN), "FORBIDDEN");
        assert_eq!(
            status_name(StatusCode::INTERNAL_SERVER_ERROR),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn test_error_body_fields() {
        let body = ErrorBody::new(StatusCode::BAD_REQUEST, "Todo not found");
        assert_eq!(body.status, "BAD_REQUEST");
        assert_eq!(body.code, 400);
        assert_eq!(body.message, "Todo not found");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "BAD_REQUEST", "code": 400, "message": "Todo not found"})
        );
    }

    #[test]
    fn test_domain_error_status_mapping() {
        assert_eq!(
            DomainError::NotFound("Todo").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DomainError::NotTodoOwner.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            DomainError::ManagerTodoMismatch { manager_id: 1, todo_id: 2 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::AuthFailure("Invalid email or password".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert!(DomainError::Weather(WeatherError::Empty).is_server_error());
        assert!(DomainError::Database(sqlx::Error::RowNotFound).is_server_error());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(DomainError::NotFound("Todo").to_string(), "Todo not found");
    }
}
