//! Route authorization policy
//!
//! A static table maps request paths to the roles allowed to call them. The
//! first matching rule wins; anything unlisted only needs an authenticated
//! principal.
//!
//! | Path                       | Access           |
//! |----------------------------|------------------|
//! | `/auth/signup`             | public           |
//! | `/auth/signin`             | public           |
//! | `/admin` and below         | ADMIN            |
//! | `/todos` and below         | ADMIN, USER      |
//! | `/users` and below         | ADMIN, USER      |
//! | anything else              | authenticated    |
//!
//! Ownership of individual todos is a separate, data-dependent check made by
//! the services through [`require_ownership`].

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::middleware::AuthUser;
use crate::error::ErrorBody;
use crate::models::user::UserRole;

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
const MEMBERS: &[UserRole] = &[UserRole::Admin, UserRole::User];

/// How a rule matches a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathRule {
    Exact(&'static str),
    /// The path itself and everything under it
    Subtree(&'static str),
}

impl PathRule {
    fn matches(&self, path: &str) -> bool {
        match *self {
            PathRule::Exact(p) => path == p,
            PathRule::Subtree(p) => {
                path == p || path.strip_prefix(p).is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Requirement attached to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Roles(&'static [UserRole]),
    Authenticated,
}

impl Access {
    pub fn permits(&self, principal: Option<&AuthUser>) -> bool {
        match (self, principal) {
            (Access::Public, _) => true,
            (Access::Authenticated, user) => user.is_some(),
            (Access::Roles(roles), Some(user)) => roles.contains(&user.role),
            (Access::Roles(_), None) => false,
        }
    }
}

const POLICY: &[(PathRule, Access)] = &[
    (PathRule::Exact("/auth/signup"), Access::Public),
    (PathRule::Exact("/auth/signin"), Access::Public),
    (PathRule::Subtree("/admin"), Access::Roles(ADMIN_ONLY)),
    (PathRule::Subtree("/todos"), Access::Roles(MEMBERS)),
    (PathRule::Subtree("/users"), Access::Roles(MEMBERS)),
];

/// Looks up the requirement for a path
pub fn required_access(path: &str) -> Access {
    POLICY
        .iter()
        .find(|(rule, _)| rule.matches(path))
        .map(|(_, access)| *access)
        .unwrap_or(Access::Authenticated)
}

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// No principal on a non-public path
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied for role {role}")]
    InsufficientRole { role: UserRole },

    #[error("Not the owner of this resource")]
    NotOwner,
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthzError::InsufficientRole { .. } | AuthzError::NotOwner => StatusCode::FORBIDDEN,
        };
        ErrorBody::new(status, self.to_string()).into_response_with(status)
    }
}

/// Checks the principal against the policy for `path`
pub fn authorize(path: &str, principal: Option<&AuthUser>) -> Result<(), AuthzError> {
    let access = required_access(path);
    if access.permits(principal) {
        return Ok(());
    }

    match principal {
        Some(user) => Err(AuthzError::InsufficientRole { role: user.role }),
        None => Err(AuthzError::Unauthenticated),
    }
}

/// Resource-level check: only the owner passes
pub fn require_ownership(principal: &AuthUser, owner_id: i64) -> Result<(), AuthzError> {
    if principal.id == owner_id {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

/// Policy middleware; must run after [`super::middleware::authenticate`]
pub async fn enforce_policy(req: Request, next: Next) -> Result<Response, AuthzError> {
    let path = req.uri().path();
    let principal = req.extensions().get::<AuthUser>();

    if let Err(e) = authorize(path, principal) {
        tracing::warn!(
            path = %path,
            user_id = principal.map(|u| u.id),
            error = %e,
            "Request denied by route policy"
        );
        return Err(e);
    }

    Ok(next.run(req).await)
}
