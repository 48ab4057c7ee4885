//! Dynamic todo queries
//!
//! A filter is reduced to a list of [`TodoPredicate`]s. Absent and blank
//! values produce no predicate, so an empty filter matches every todo. The
//! predicates are ANDed into the `WHERE` clause of both the page query and
//! its matching `COUNT(*)` query, which keeps `totalElements` consistent with
//! the page content.
//!
//! Two shapes are supported:
//!
//! - **list**: full todos with their author, filtered by weather and a
//!   modification window, newest modification first
//! - **search**: title plus manager and comment counts, filtered by title,
//!   author nickname and a creation window, newest creation first
//!
//! Text matching is case-insensitive substring (`ILIKE`) with `%`, `_` and `\`
//! in the user's term escaped so they match literally.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::pagination::{Page, PageRequest};
use crate::models::todo::TodoWithAuthor;

const LIST_SELECT: &str = "SELECT t.id, t.title, t.contents, t.weather, t.created_at, \
     t.modified_at, u.id AS user_id, u.email AS user_email \
     FROM todos t JOIN users u ON u.id = t.user_id";

const SEARCH_SELECT: &str = "SELECT t.id, t.title, \
     COUNT(DISTINCT m.id) AS manager_count, COUNT(DISTINCT c.id) AS comment_count \
     FROM todos t JOIN users u ON u.id = t.user_id \
     LEFT JOIN managers m ON m.todo_id = t.id \
     LEFT JOIN comments c ON c.todo_id = t.id";

const COUNT_SELECT: &str = "SELECT COUNT(*) FROM todos t JOIN users u ON u.id = t.user_id";

/// One optional constraint on the todos table (`t`) or its author (`u`)
#[derive(Debug, Clone, PartialEq)]
pub enum TodoPredicate {
    WeatherEquals(String),
    TitleContains(String),
    NicknameContains(String),
    CreatedFrom(DateTime<Utc>),
    CreatedUntil(DateTime<Utc>),
    ModifiedFrom(DateTime<Utc>),
    ModifiedUntil(DateTime<Utc>),
}

impl TodoPredicate {
    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            TodoPredicate::WeatherEquals(weather) => {
                qb.push("t.weather = ").push_bind(weather.clone());
            }
            TodoPredicate::TitleContains(term) => {
                qb.push("t.title ILIKE ").push_bind(contains_pattern(term));
            }
            TodoPredicate::NicknameContains(term) => {
                qb.push("u.nickname ILIKE ").push_bind(contains_pattern(term));
            }
            TodoPredicate::CreatedFrom(at) => {
                qb.push("t.created_at >= ").push_bind(*at);
            }
            TodoPredicate::CreatedUntil(at) => {
                qb.push("t.created_at <= ").push_bind(*at);
            }
            TodoPredicate::ModifiedFrom(at) => {
                qb.push("t.modified_at >= ").push_bind(*at);
            }
            TodoPredicate::ModifiedUntil(at) => {
                qb.push("t.modified_at <= ").push_bind(*at);
            }
        }
    }
}

/// Filter for the todo listing
#[derive(Debug, Clone, Default)]
pub struct TodoListFilter {
    /// Exact weather label
    pub weather: Option<String>,

    /// Inclusive lower bound on `modified_at`
    pub modified_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `modified_at`
    pub modified_until: Option<DateTime<Utc>>,
}

impl TodoListFilter {
    pub fn predicates(&self) -> Vec<TodoPredicate> {
        let mut predicates = Vec::new();
        if let Some(weather) = non_blank(&self.weather) {
            predicates.push(TodoPredicate::WeatherEquals(weather.to_string()));
        }
        if let Some(from) = self.modified_from {
            predicates.push(TodoPredicate::ModifiedFrom(from));
        }
        if let Some(until) = self.modified_until {
            predicates.push(TodoPredicate::ModifiedUntil(until));
        }
        predicates
    }
}

/// Filter for the todo search
#[derive(Debug, Clone, Default)]
pub struct TodoSearchFilter {
    /// Substring of the title
    pub title: Option<String>,

    /// Substring of the author's nickname
    pub nickname: Option<String>,

    /// Inclusive lower bound on `created_at`
    pub created_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `created_at`
    pub created_until: Option<DateTime<Utc>>,
}

impl TodoSearchFilter {
    pub fn predicates(&self) -> Vec<TodoPredicate> {
        let mut predicates = Vec::new();
        if let Some(title) = non_blank(&self.title) {
            predicates.push(TodoPredicate::TitleContains(title.to_string()));
        }
        if let Some(from) = self.created_from {
            predicates.push(TodoPredicate::CreatedFrom(from));
        }
        if let Some(until) = self.created_until {
            predicates.push(TodoPredicate::CreatedUntil(until));
        }
        if let Some(nickname) = non_blank(&self.nickname) {
            predicates.push(TodoPredicate::NicknameContains(nickname.to_string()));
        }
        predicates
    }
}

/// Search row: a todo's title with its collaborator and comment counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TodoSummary {
    pub id: i64,
    pub title: String,
    pub manager_count: i64,
    pub comment_count: i64,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wraps a term for a literal substring match under `ILIKE`
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Appends `WHERE p1 AND p2 ...`; nothing for an empty list
pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[TodoPredicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        predicate.push_sql(qb);
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: PageRequest) {
    qb.push(" LIMIT ")
        .push_bind(page.size())
        .push(" OFFSET ")
        .push_bind(page.offset());
}

/// Page query for the listing
pub fn list_query(filter: &TodoListFilter, page: PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(LIST_SELECT);
    push_where(&mut qb, &filter.predicates());
    qb.push(" ORDER BY t.modified_at DESC, t.id DESC");
    push_page(&mut qb, page);
    qb
}

/// Page query for the search
pub fn search_query(
    filter: &TodoSearchFilter,
    page: PageRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SEARCH_SELECT);
    push_where(&mut qb, &filter.predicates());
    qb.push(" GROUP BY t.id ORDER BY t.created_at DESC, t.id DESC");
    push_page(&mut qb, page);
    qb
}

/// `COUNT(*)` over the same joins and predicates as the page queries
pub fn count_query(predicates: &[TodoPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(COUNT_SELECT);
    push_where(&mut qb, predicates);
    qb
}

async fn count(pool: &PgPool, predicates: &[TodoPredicate]) -> Result<i64, sqlx::Error> {
    let mut qb = count_query(predicates);
    let (total,): (i64,) = qb.build_query_as().fetch_one(pool).await?;
    Ok(total)
}

/// Paginated listing of full todos with their author
pub async fn list_todos(
    pool: &PgPool,
    filter: &TodoListFilter,
    page: PageRequest,
) -> Result<Page<TodoWithAuthor>, sqlx::Error> {
    let total = count(pool, &filter.predicates()).await?;
    if total == 0 {
        return Ok(Page::empty(page));
    }

    let mut qb = list_query(filter, page);
    let content = qb.build_query_as::<TodoWithAuthor>().fetch_all(pool).await?;

    Ok(Page::new(content, page, total))
}

/// Paginated search returning per-todo counts
pub async fn search_todos(
    pool: &PgPool,
    filter: &TodoSearchFilter,
    page: PageRequest,
) -> Result<Page<TodoSummary>, sqlx::Error> {
    let total = count(pool, &filter.predicates()).await?;
    if total == 0 {
        return Ok(Page::empty(page));
    }

    let mut qb = search_query(filter, page);
    let content = qb.build_query_as::<TodoSummary>().fetch_all(pool).await?;

    tracing::debug!(total, returned = content.len(), "Todo search executed");
    Ok(Page::new(content, page, total))
}
