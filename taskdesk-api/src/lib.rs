//! # Taskdesk API Server Library
//!
//! HTTP surface of Taskdesk: routing, request validation, error rendering
//! and the admin access log. Domain logic lives in `taskdesk_shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: API-only middleware
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
