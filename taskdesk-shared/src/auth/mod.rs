//! Authentication and authorization
//!
//! - [`jwt`]: Bearer token issuing and validation
//! - [`password`]: Argon2id hashing and the new-password policy
//! - [`middleware`]: The authentication gate and the [`middleware::AuthUser`] principal
//! - [`authorization`]: Path-to-role policy and ownership checks
//!
//! Requests pass the gate first and the policy second:
//!
//! ```text
//! request -> authenticate -> enforce_policy -> handler
//! ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use middleware::AuthUser;
