//! Database layer for Taskdesk
//!
//! - `pool`: PostgreSQL connection pool with a startup health check
//! - `migrations`: Embedded schema migrations from the workspace `migrations/`
//!
//! Row types and their queries are in [`crate::models`].

pub mod migrations;
pub mod pool;
