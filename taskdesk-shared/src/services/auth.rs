//! Signup and signin

use sqlx::PgPool;
use tracing::info;

use crate::auth::jwt::{TokenService, BEARER_PREFIX};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{DomainError, DomainResult};
use crate::models::user::{CreateUser, User, UserRole};

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Registration input; `role` is parsed case-insensitively
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub role: String,
}

/// A user together with a freshly issued token
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: User,

    /// Raw JWT without the scheme prefix
    pub token: String,
}

impl Authenticated {
    /// `"Bearer <jwt>"`
    pub fn bearer_token(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.token)
    }
}

/// Creates an account and issues its first token
///
/// # Errors
///
/// - `InvalidRequest` if the email is taken or the role is unknown
pub async fn signup(
    pool: &PgPool,
    tokens: &TokenService,
    input: SignupInput,
) -> DomainResult<Authenticated> {
    if User::exists_by_email(pool, &input.email).await? {
        return Err(DomainError::invalid("Email is already registered"));
    }

    let role = UserRole::parse(&input.role)?;
    let password_hash = hash_password(&input.password)?;

    let user = User::create(
        pool,
        CreateUser {
            email: input.email,
            password_hash: Some(password_hash),
            nickname: input.nickname,
            role,
        },
    )
    .await
    .map_err(|e| match e {
        // Lost a race with a concurrent signup for the same email
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DomainError::invalid("Email is already registered")
        }
        other => DomainError::from(other),
    })?;

    let token = tokens.issue(user.id, &user.email, &user.nickname, user.role)?;
    info!(user_id = user.id, role = %user.role, "User signed up");

    Ok(Authenticated { user, token })
}

/// Verifies credentials and issues a token
///
/// Unknown email, wrong password and accounts without a password all fail
/// the same way.
pub async fn signin(
    pool: &PgPool,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> DomainResult<Authenticated> {
    let user = User::find_by_email(pool, email)
        .await?
        .ok_or_else(|| DomainError::AuthFailure(BAD_CREDENTIALS.to_string()))?;

    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(|| DomainError::AuthFailure(BAD_CREDENTIALS.to_string()))?;

    if !verify_password(password, hash)? {
        return Err(DomainError::AuthFailure(BAD_CREDENTIALS.to_string()));
    }

    let token = tokens.issue(user.id, &user.email, &user.nickname, user.role)?;
    info!(user_id = user.id, "User signed in");

    Ok(Authenticated { user, token })
}
