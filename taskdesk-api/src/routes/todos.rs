//! Todo endpoints
//!
//! - `POST /todos` - Create a todo stamped with today's weather
//! - `GET /todos` - Page through todos, newest modification first
//! - `GET /todos/search` - Search todos with manager and comment counts
//! - `GET /todos/:todo_id` - Get one todo
//!
//! Date query parameters are ISO-8601 local date-times without an offset
//! (`2024-10-01T09:00:00`) and are read as UTC.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use taskdesk_shared::auth::AuthUser;
use taskdesk_shared::models::todo::TodoWithAuthor;
use taskdesk_shared::query::{Page, PageRequest, TodoListFilter, TodoSearchFilter, TodoSummary};
use taskdesk_shared::services::todo::{self, NewTodo};
use validator::Validate;

use super::users::UserResponse;
use crate::{app::AppState, error::ApiResult};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: UserResponse,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<TodoWithAuthor> for TodoResponse {
    fn from(todo: TodoWithAuthor) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user: UserResponse::new(todo.user_id, todo.user_email),
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// Query parameters for `GET /todos`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub weather: Option<String>,

    /// Lower bound on the modification time
    pub start_date: Option<NaiveDateTime>,

    /// Upper bound on the modification time
    pub end_date: Option<NaiveDateTime>,
}

/// Query parameters for `GET /todos/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSearchParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub title: Option<String>,
    pub nickname: Option<String>,

    /// Lower bound on the creation time
    pub start_date: Option<NaiveDateTime>,

    /// Upper bound on the creation time
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSearchResponse {
    pub title: String,
    pub manager_count: i64,
    pub comment_count: i64,
}

impl From<TodoSummary> for TodoSearchResponse {
    fn from(summary: TodoSummary) -> Self {
        Self {
            title: summary.title,
            manager_count: summary.manager_count,
            comment_count: summary.comment_count,
        }
    }
}

fn as_utc(value: Option<NaiveDateTime>) -> Option<DateTime<Utc>> {
    value.map(|naive| Utc.from_utc_datetime(&naive))
}

impl From<&TodoListParams> for TodoListFilter {
    fn from(params: &TodoListParams) -> Self {
        Self {
            weather: params.weather.clone(),
            modified_from: as_utc(params.start_date),
            modified_until: as_utc(params.end_date),
        }
    }
}

impl From<&TodoSearchParams> for TodoSearchFilter {
    fn from(params: &TodoSearchParams) -> Self {
        Self {
            title: params.title.clone(),
            nickname: params.nickname.clone(),
            created_from: as_utc(params.start_date),
            created_until: as_utc(params.end_date),
        }
    }
}

/// Create a todo
///
/// ```text
/// POST /todos
/// Authorization: Bearer <jwt>
///
/// { "title": "Plan sprint", "contents": "Collect estimates" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `500 Internal Server Error`: Weather lookup failed
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let created = todo::create_todo(
        &state.db,
        state.weather.as_ref(),
        &principal,
        NewTodo {
            title: req.title,
            contents: req.contents,
        },
    )
    .await?;

    Ok(Json(created.into()))
}

/// Get a todo by id
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(todo_id) = path?;
    let found = todo::get_todo(&state.db, todo_id).await?;

    Ok(Json(found.into()))
}

/// List todos
///
/// ```text
/// GET /todos?page=1&size=10&weather=Sunny&startDate=2024-10-01T00:00:00
/// ```
pub async fn list_todos(
    State(state): State<AppState>,
    params: Result<Query<TodoListParams>, QueryRejection>,
) -> ApiResult<Json<Page<TodoResponse>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.size)?;

    let todos = todo::list_todos(&state.db, &TodoListFilter::from(&params), page).await?;

    Ok(Json(todos.map(TodoResponse::from)))
}

/// Search todos
///
/// All filters are optional and combined with AND. `title` and `nickname`
/// match case-insensitive substrings.
pub async fn search_todos(
    State(state): State<AppState>,
    params: Result<Query<TodoSearchParams>, QueryRejection>,
) -> ApiResult<Json<Page<TodoSearchResponse>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.size)?;

    let found = todo::search_todos(&state.db, &TodoSearchFilter::from(&params), page).await?;

    Ok(Json(found.map(TodoSearchResponse::from)))
}
