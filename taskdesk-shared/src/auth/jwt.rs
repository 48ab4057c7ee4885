//! Bearer token issuing and validation
//!
//! Tokens are HS256-signed JWTs carrying the user's identity so the
//! authentication gate can build a principal without touching the database.
//!
//! # Security
//!
//! - **Algorithm**: HS256 (HMAC with SHA-256)
//! - **Lifetime**: 60 minutes from issue, no refresh
//! - **Secret**: base64-encoded, must decode to at least 32 bytes
//!
//! # Example
//!
//! ```
//! use taskdesk_shared::auth::jwt::TokenService;
//! use taskdesk_shared::models::user::UserRole;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // base64 of "taskdesk-test-secret-key-at-least-32-bytes"
//! let tokens = TokenService::from_base64_secret(
//!     "dGFza2Rlc2stdGVzdC1zZWNyZXQta2V5LWF0LWxlYXN0LTMyLWJ5dGVz",
//! )?;
//!
//! let token = tokens.issue(7, "kim@example.com", "kim", UserRole::User)?;
//! assert!(tokens.validate(&token));
//!
//! let claims = tokens.extract_claims(&token)?;
//! assert_eq!(claims.user_id()?, 7);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

/// Token lifetime
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Scheme prefix used in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

const MIN_SECRET_BYTES: usize = 32;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Secret is not valid base64
    #[error("JWT secret is not valid base64: {0}")]
    InvalidSecret(String),

    /// Secret decodes to fewer than 32 bytes
    #[error("JWT secret must decode to at least 32 bytes, got {0}")]
    WeakSecret(usize),

    #[error("Failed to create token: {0}")]
    CreateError(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Well-formed token whose claims are missing or malformed
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Invalid token format: {0}")]
    InvalidFormat(String),
}

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID as a decimal string
    pub sub: String,

    pub email: String,

    pub nickname: String,

    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims for a freshly issued token
    pub fn new(user_id: i64, email: &str, nickname: &str, role: UserRole) -> Self {
        Self::with_expiration(user_id, email, nickname, role, Duration::minutes(TOKEN_TTL_MINUTES))
    }

    /// Claims expiring `expires_in` from now (negative for already expired)
    pub fn with_expiration(
        user_id: i64,
        email: &str,
        nickname: &str,
        role: UserRole,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            nickname: nickname.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Parses the subject back into a user ID
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidClaims(format!("subject is not a user id: {}", self.sub)))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs and verifies bearer tokens with a single shared secret
///
/// Built once at startup; a bad secret is a fatal configuration error.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    /// Builds the service from a base64-encoded secret
    ///
    /// # Errors
    ///
    /// - `JwtError::InvalidSecret` if the value is not base64
    /// - `JwtError::WeakSecret` if it decodes to fewer than 32 bytes
    pub fn from_base64_secret(secret: &str) -> Result<Self, JwtError> {
        let key = STANDARD
            .decode(secret.trim())
            .map_err(|e| JwtError::InvalidSecret(e.to_string()))?;

        if key.len() < MIN_SECRET_BYTES {
            return Err(JwtError::WeakSecret(key.len()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            validation,
        })
    }

    /// Issues a 60-minute token for the given identity
    ///
    /// Returns the raw JWT; callers add [`BEARER_PREFIX`] where the
    /// transport needs it.
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        nickname: &str,
        role: UserRole,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(user_id, email, nickname, role))
    }

    /// Signs arbitrary claims
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| JwtError::CreateError(e.to_string()))
    }

    /// True only for a well-formed, correctly signed, unexpired token
    ///
    /// Failures are logged and never propagated.
    pub fn validate(&self, token: &str) -> bool {
        match self.extract_claims(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected bearer token");
                false
            }
        }
    }

    /// Verifies the token and returns its claims
    ///
    /// # Errors
    ///
    /// - `JwtError::Expired` past `exp`
    /// - `JwtError::InvalidSignature` when signed with another key
    /// - `JwtError::InvalidClaims` when a claim is missing or malformed
    /// - `JwtError::InvalidFormat` for anything that is not a JWT
    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    JwtError::InvalidClaims(e.to_string())
                }
                _ => JwtError::InvalidFormat(e.to_string()),
            })
    }
}

/// Pulls the token out of an `Authorization` header value
///
/// Returns `None` unless the value starts with `"Bearer "`.
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
