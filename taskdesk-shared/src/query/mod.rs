//! Todo query engine
//!
//! - `pagination`: 1-based page requests and the page envelope
//! - `todo_query`: Filter-to-SQL translation for todo listing and search

pub mod pagination;
pub mod todo_query;

pub use pagination::{Page, PageRequest};
pub use todo_query::{TodoListFilter, TodoSearchFilter, TodoSummary};
