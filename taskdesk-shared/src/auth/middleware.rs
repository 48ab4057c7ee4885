//! Authentication gate
//!
//! Runs before every route. Signup and signin pass through untouched. Every
//! other request must carry `Authorization: Bearer <token>` with a valid
//! token; the gate turns its claims into an [`AuthUser`] and stores it in the
//! request extensions. Handlers read it with `Extension<AuthUser>`.
//!
//! The gate only establishes identity. Role checks happen afterwards in
//! [`super::authorization::enforce_policy`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Extension, Router};
//! use taskdesk_shared::auth::jwt::TokenService;
//! use taskdesk_shared::auth::middleware::{authenticate, AuthUser};
//!
//! async fn me(Extension(user): Extension<AuthUser>) -> String {
//!     user.email
//! }
//!
//! # fn build(tokens: Arc<TokenService>) -> Router {
//! Router::new()
//!     .route("/me", get(me))
//!     .layer(middleware::from_fn_with_state(tokens, authenticate))
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::jwt::{strip_bearer, Claims, JwtError, TokenService};
use crate::error::ErrorBody;
use crate::models::user::UserRole;

/// Paths reachable without a token
pub const PUBLIC_PATHS: [&str; 2] = ["/auth/signup", "/auth/signin"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Authenticated principal built from token claims
///
/// No database lookup happens here, so a user deleted after the token was
/// issued still authenticates until the token expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub role: UserRole,

    /// Always `None` for token-derived principals
    pub password_hash: Option<String>,
}

impl AuthUser {
    pub fn from_claims(claims: &Claims) -> Result<Self, JwtError> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email.clone(),
            nickname: claims.nickname.clone(),
            role: claims.role,
            password_hash: None,
        })
    }
}

/// Error type for the authentication gate
///
/// Every variant renders as 401 with a `WWW-Authenticate` challenge.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT token is required")]
    MissingCredentials,

    /// Header present but not a Bearer credential
    #[error("Authorization header must use the Bearer scheme")]
    InvalidFormat,

    #[error("Invalid or expired JWT token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let challenge = match self {
            AuthError::MissingCredentials => "Bearer realm=\"taskdesk\"",
            AuthError::InvalidFormat | AuthError::InvalidToken => {
                "Bearer realm=\"taskdesk\", error=\"invalid_token\""
            }
        };

        let status = StatusCode::UNAUTHORIZED;
        let mut response = ErrorBody::new(status, self.to_string()).into_response_with(status);
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        response
    }
}

/// Authentication middleware, see the module docs
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let token = strip_bearer(header_value).ok_or(AuthError::InvalidFormat)?;

    if !tokens.validate(token) {
        return Err(AuthError::InvalidToken);
    }

    let user = tokens
        .extract_claims(token)
        .and_then(|claims| AuthUser::from_claims(&claims))
        .map_err(|e| {
            tracing::warn!(error = %e, "Token validated but claims are unusable");
            AuthError::InvalidToken
        })?;

    tracing::debug!(user_id = user.id, role = %user.role, "Authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
