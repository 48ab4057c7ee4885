//! Database models for Taskdesk
//!
//! # Models
//!
//! - `user`: Accounts, roles and credentials
//! - `todo`: Todo items with the weather captured at creation
//! - `comment`: Comments attached to a todo
//! - `manager`: Users registered as collaborators on a todo
//! - `audit_log`: Append-only audit trail

pub mod audit_log;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;
