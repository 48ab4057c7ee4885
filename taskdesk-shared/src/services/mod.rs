//! Use-case operations
//!
//! Each function takes the pool (plus whatever collaborators it needs),
//! applies the business rules and returns [`crate::error::DomainResult`].
//! HTTP concerns stay in the API crate.

pub mod audit;
pub mod auth;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;
