//! Integration tests for todo listing and search
//!
//! Tests that assert on table-wide totals hold `table_lock()` so tests in
//! this binary do not insert rows underneath each other.

mod common;

use chrono::{Duration, Utc};
use common::{create_todo, create_user, setup_pool, table_lock, tag};
use taskdesk_shared::models::comment::{Comment, CreateComment};
use taskdesk_shared::models::manager::Manager;
use taskdesk_shared::models::user::UserRole;
use taskdesk_shared::query::todo_query::{list_todos, search_todos};
use taskdesk_shared::query::{PageRequest, TodoListFilter, TodoSearchFilter};

#[tokio::test]
async fn test_search_without_filters_matches_everything() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let author = create_user(&pool, "everyone", UserRole::User).await;
    create_todo(&pool, &author, "one").await;
    create_todo(&pool, &author, "two").await;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(&pool)
        .await
        .unwrap();

    let page = search_todos(
        &pool,
        &TodoSearchFilter::default(),
        PageRequest::new(Some(1), Some(total)).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(page.total_elements, total);
    assert_eq!(page.total_pages, 1);

    let expected: Vec<i64> =
        sqlx::query_scalar("SELECT id FROM todos ORDER BY created_at DESC, id DESC")
            .fetch_all(&pool)
            .await
            .unwrap();
    let ids: Vec<i64> = page.content.iter().map(|t| t.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_counts_managers_and_comments() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let author = create_user(&pool, "counter", UserRole::User).await;
    let helper = create_user(&pool, "counted", UserRole::User).await;
    let todo = create_todo(&pool, &author, &format!("busy {}", marker)).await;

    Manager::create(&pool, helper.id, todo.id).await.unwrap();
    Manager::create(&pool, author.id, todo.id).await.unwrap();
    for i in 0..3 {
        Comment::create(
            &pool,
            CreateComment {
                contents: format!("comment {}", i),
                user_id: helper.id,
                todo_id: todo.id,
            },
        )
        .await
        .unwrap();
    }

    let filter = TodoSearchFilter {
        title: Some(marker),
        ..Default::default()
    };
    let page = search_todos(&pool, &filter, PageRequest::default()).await.unwrap();

    assert_eq!(page.total_elements, 1);
    let summary = &page.content[0];
    assert_eq!(summary.id, todo.id);
    assert_eq!(summary.manager_count, 2);
    assert_eq!(summary.comment_count, 3);
}

#[tokio::test]
async fn test_search_title_is_case_insensitive_substring() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let author = create_user(&pool, "titles", UserRole::User).await;
    create_todo(&pool, &author, &format!("Weekly MEETING {}", marker)).await;
    create_todo(&pool, &author, &format!("lunch {}", marker)).await;

    let filter = TodoSearchFilter {
        title: Some(format!("meeting {}", marker)),
        ..Default::default()
    };
    let page = search_todos(&pool, &filter, PageRequest::default()).await.unwrap();

    assert_eq!(page.total_elements, 1);
    assert!(page.content[0].title.starts_with("Weekly MEETING"));
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let author = create_user(&pool, "percent", UserRole::User).await;
    create_todo(&pool, &author, &format!("100% done {}", marker)).await;
    create_todo(&pool, &author, &format!("1000 done {}", marker)).await;

    let filter = TodoSearchFilter {
        title: Some("100%".to_string()),
        nickname: Some("percent".to_string()),
        ..Default::default()
    };
    let page = search_todos(&pool, &filter, PageRequest::default()).await.unwrap();

    assert!(page.content.iter().all(|t| t.title.contains("100%")));
    assert!(page.content.iter().any(|t| t.title.ends_with(&marker)));
}

#[tokio::test]
async fn test_search_filters_are_anded() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let nick_a = format!("alpha{}", marker);
    let nick_b = format!("beta{}", marker);
    let alpha = create_user(&pool, &nick_a, UserRole::User).await;
    let beta = create_user(&pool, &nick_b, UserRole::User).await;
    create_todo(&pool, &alpha, &format!("report {}", marker)).await;
    create_todo(&pool, &beta, &format!("report {}", marker)).await;
    create_todo(&pool, &alpha, &format!("other {}", marker)).await;

    let by_title = TodoSearchFilter {
        title: Some(format!("report {}", marker)),
        ..Default::default()
    };
    assert_eq!(
        search_todos(&pool, &by_title, PageRequest::default())
            .await
            .unwrap()
            .total_elements,
        2
    );

    let by_both = TodoSearchFilter {
        title: Some(format!("report {}", marker)),
        nickname: Some(nick_a.to_uppercase()),
        ..Default::default()
    };
    let page = search_todos(&pool, &by_both, PageRequest::default()).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content.len(), 1);
}

#[tokio::test]
async fn test_search_date_window() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let author = create_user(&pool, "dated", UserRole::User).await;
    let todo = create_todo(&pool, &author, &format!("dated {}", marker)).await;

    let inside = TodoSearchFilter {
        title: Some(marker.clone()),
        created_from: Some(todo.created_at - Duration::minutes(1)),
        created_until: Some(todo.created_at + Duration::minutes(1)),
        ..Default::default()
    };
    assert_eq!(
        search_todos(&pool, &inside, PageRequest::default())
            .await
            .unwrap()
            .total_elements,
        1
    );

    let future = TodoSearchFilter {
        title: Some(marker),
        created_from: Some(Utc::now() + Duration::days(1)),
        ..Default::default()
    };
    let page = search_todos(&pool, &future, PageRequest::default()).await.unwrap();
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn test_search_pagination() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let marker = tag();
    let author = create_user(&pool, "pager", UserRole::User).await;
    for i in 0..5 {
        create_todo(&pool, &author, &format!("page {} {}", i, marker)).await;
    }

    let filter = TodoSearchFilter {
        title: Some(marker),
        ..Default::default()
    };

    let first = search_todos(&pool, &filter, PageRequest::new(Some(1), Some(2)).unwrap())
        .await
        .unwrap();
    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content.len(), 2);
    // newest first
    assert!(first.content[0].title.starts_with("page 4"));

    let last = search_todos(&pool, &filter, PageRequest::new(Some(3), Some(2)).unwrap())
        .await
        .unwrap();
    assert_eq!(last.content.len(), 1);
    assert!(last.content[0].title.starts_with("page 0"));

    let beyond = search_todos(&pool, &filter, PageRequest::new(Some(9), Some(2)).unwrap())
        .await
        .unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.total_elements, 5);
}

#[tokio::test]
async fn test_list_filters_by_weather() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let author = create_user(&pool, "lister", UserRole::User).await;
    let todo = create_todo(&pool, &author, "listed").await;

    let weather = format!("Hail-{}", tag());
    sqlx::query("UPDATE todos SET weather = $1 WHERE id = $2")
        .bind(&weather)
        .bind(todo.id)
        .execute(&pool)
        .await
        .unwrap();

    let filter = TodoListFilter {
        weather: Some(weather.clone()),
        ..Default::default()
    };
    let page = list_todos(&pool, &filter, PageRequest::default()).await.unwrap();

    assert_eq!(page.total_elements, 1);
    let listed = &page.content[0];
    assert_eq!(listed.id, todo.id);
    assert_eq!(listed.weather, weather);
    assert_eq!(listed.user_email, author.email);
}

#[tokio::test]
async fn test_list_orders_by_modification() {
    let _guard = table_lock().lock().await;
    let pool = setup_pool().await;
    let author = create_user(&pool, "modder", UserRole::User).await;
    let older = create_todo(&pool, &author, "older").await;
    create_todo(&pool, &author, "newer").await;

    // touching the older todo moves it to the front
    sqlx::query("UPDATE todos SET modified_at = NOW() + INTERVAL '1 hour' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await
        .unwrap();

    let filter = TodoListFilter {
        modified_from: Some(Utc::now() + Duration::minutes(30)),
        ..Default::default()
    };
    let page = list_todos(&pool, &filter, PageRequest::default()).await.unwrap();
    assert_eq!(page.content.first().map(|t| t.id), Some(older.id));

    let unfiltered = list_todos(&pool, &TodoListFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(unfiltered.content[0].id, older.id);
}
