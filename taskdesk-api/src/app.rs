//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use taskdesk_api::{app::{build_router, AppState}, config::Config};
//! use sqlx::PgPool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let state = AppState::from_config(pool, config)?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, build_router(state)).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use taskdesk_shared::auth::{authorization::enforce_policy, jwt::JwtError, jwt::TokenService};
use taskdesk_shared::auth::middleware::authenticate;
use taskdesk_shared::weather::{HttpWeatherClient, WeatherProvider};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::middleware::admin_log::admin_access_log;
use crate::routes;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,

    pub config: Arc<Config>,

    /// Signs and verifies bearer tokens
    pub tokens: Arc<TokenService>,

    /// Source of the weather stamped on new todos
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        config: Config,
        tokens: TokenService,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            weather,
        }
    }

    /// Builds the token service and HTTP weather client from configuration
    ///
    /// # Errors
    ///
    /// Fails if `JWT_SECRET_KEY` is not base64 or decodes to fewer than 32
    /// bytes; callers treat this as fatal.
    pub fn from_config(db: PgPool, config: Config) -> Result<Self, JwtError> {
        let tokens = TokenService::from_base64_secret(&config.jwt.secret_key)?;
        let weather = Arc::new(HttpWeatherClient::new(config.weather.url.clone()));

        Ok(Self::new(db, config, tokens, weather))
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── /auth/signup                         POST   (public)
/// ├── /auth/signin                         POST   (public)
/// ├── /todos                               POST, GET
/// ├── /todos/search                        GET
/// ├── /todos/:todo_id                      GET
/// ├── /todos/:todo_id/comments             POST, GET
/// ├── /todos/:todo_id/managers             POST, GET
/// ├── /todos/:todo_id/managers/:manager_id DELETE
/// ├── /users                               PUT    (own password)
/// ├── /users/:user_id                      GET
/// └── /admin/users/:user_id                PATCH  (ADMIN, access-logged)
/// ```
///
/// # Middleware Stack
///
/// Outermost first: CORS, tracing, authentication gate, route policy, then
/// the admin access log on `/admin` routes only.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/signin", post(routes::auth::signin));

    let todo_routes = Router::new()
        .route(
            "/todos",
            post(routes::todos::create_todo).get(routes::todos::list_todos),
        )
        .route("/todos/search", get(routes::todos::search_todos))
        .route("/todos/:todo_id", get(routes::todos::get_todo))
        .route(
            "/todos/:todo_id/comments",
            post(routes::comments::create_comment).get(routes::comments::list_comments),
        )
        .route(
            "/todos/:todo_id/managers",
            post(routes::managers::create_manager).get(routes::managers::list_managers),
        )
        .route(
            "/todos/:todo_id/managers/:manager_id",
            delete(routes::managers::delete_manager),
        );

    let user_routes = Router::new()
        .route("/users", put(routes::users::change_password))
        .route("/users/:user_id", get(routes::users::get_user));

    let admin_routes = Router::new()
        .route("/admin/users/:user_id", patch(routes::admin::change_user_role))
        .route_layer(from_fn_with_state(state.clone(), admin_access_log));

    let cors = if state.config.allows_any_origin() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers([header::AUTHORIZATION])
            .max_age(Duration::from_secs(3600))
    };

    Router::new()
        .merge(auth_routes)
        .merge(todo_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(from_fn(enforce_policy))
        .layer(from_fn_with_state(state.tokens.clone(), authenticate))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
