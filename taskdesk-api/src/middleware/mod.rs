//! Middleware specific to the API server
//!
//! Authentication and the route policy live in `taskdesk_shared::auth`;
//! this module only holds what needs the API's `AppState`.

pub mod admin_log;
