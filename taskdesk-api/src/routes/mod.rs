//! API route handlers, one module per resource
//!
//! - `auth`: Signup and signin (public)
//! - `todos`: Todo creation, lookup, listing and search
//! - `comments`: Comments on a todo
//! - `managers`: Managers of a todo
//! - `users`: Profile lookup and password change
//! - `admin`: Role changes (ADMIN only)
//!
//! Body, query and path extractors are taken as `Result<_, Rejection>` so a
//! malformed request still gets the uniform error body.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod managers;
pub mod todos;
pub mod users;
