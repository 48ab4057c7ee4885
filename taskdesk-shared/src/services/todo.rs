//! Todo creation, lookup, listing and search

use sqlx::PgPool;
use tracing::info;

use crate::auth::AuthUser;
use crate::error::{DomainError, DomainResult};
use crate::models::todo::{CreateTodo, Todo, TodoWithAuthor};
use crate::models::user::{CreateUser, User};
use crate::query::todo_query::{self, TodoListFilter, TodoSearchFilter, TodoSummary};
use crate::query::{Page, PageRequest};
use crate::weather::WeatherProvider;

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub contents: String,
}

/// Creates a todo stamped with today's weather
///
/// The author is the user whose email matches the principal. If no such
/// user exists yet, one is created from the token claims without a password.
/// The weather is fetched first, so a weather failure leaves nothing behind.
pub async fn create_todo(
    pool: &PgPool,
    weather: &dyn WeatherProvider,
    principal: &AuthUser,
    input: NewTodo,
) -> DomainResult<TodoWithAuthor> {
    let weather = weather.today_weather().await?;

    let mut tx = pool.begin().await?;

    let author = match User::find_by_email(&mut *tx, &principal.email).await? {
        Some(user) => user,
        None => {
            info!(email = %principal.email, "Creating user from token claims");
            User::create(
                &mut *tx,
                CreateUser {
                    email: principal.email.clone(),
                    password_hash: None,
                    nickname: principal.nickname.clone(),
                    role: principal.role,
                },
            )
            .await?
        }
    };

    let todo = Todo::create(
        &mut *tx,
        CreateTodo {
            title: input.title,
            contents: input.contents,
            weather,
            user_id: author.id,
        },
    )
    .await?;

    tx.commit().await?;

    info!(todo_id = todo.id, user_id = author.id, weather = %todo.weather, "Todo created");

    Ok(TodoWithAuthor {
        id: todo.id,
        title: todo.title,
        contents: todo.contents,
        weather: todo.weather,
        created_at: todo.created_at,
        modified_at: todo.modified_at,
        user_id: author.id,
        user_email: author.email,
    })
}

pub async fn get_todo(pool: &PgPool, todo_id: i64) -> DomainResult<TodoWithAuthor> {
    Todo::find_with_author(pool, todo_id)
        .await?
        .ok_or(DomainError::NotFound("Todo"))
}

pub async fn list_todos(
    pool: &PgPool,
    filter: &TodoListFilter,
    page: PageRequest,
) -> DomainResult<Page<TodoWithAuthor>> {
    Ok(todo_query::list_todos(pool, filter, page).await?)
}

pub async fn search_todos(
    pool: &PgPool,
    filter: &TodoSearchFilter,
    page: PageRequest,
) -> DomainResult<Page<TodoSummary>> {
    Ok(todo_query::search_todos(pool, filter, page).await?)
}
