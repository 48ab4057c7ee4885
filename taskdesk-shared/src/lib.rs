//! # Taskdesk Shared Library
//!
//! Domain types, persistence and business logic used by the Taskdesk API
//! server.
//!
//! ## Module Organization
//!
//! - `auth`: Bearer tokens, password hashing, the authentication gate and
//!   the route authorization policy
//! - `db`: Connection pool and migrations
//! - `models`: Database rows and their queries
//! - `query`: Filtered, paginated todo listing and search
//! - `services`: Use-case operations (signup, todos, managers, ...)
//! - `weather`: Today's weather lookup used when a todo is created
//! - `error`: The domain error type and the uniform error body

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod weather;

/// Current version of the Taskdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
