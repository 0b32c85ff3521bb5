/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware. The state carries the explicitly constructed
/// persistence handle (the sqlx pool); there is no global registry.
///
/// # Example
///
/// ```no_run
/// use taskyard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskyard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health              # Health check
/// ├── POST   /auth/register       # Create an account
/// ├── POST   /auth/login          # Verify credentials
/// ├── GET    /tasks               # List (public)
/// ├── POST   /tasks               # Create (X-User-Id)
/// ├── GET    /tasks/:id           # Get single (public)
/// ├── PUT    /tasks/:id           # Partial update (X-User-Id)
/// ├── DELETE /tasks/:id           # Delete (X-User-Id)
/// ├── /contacts, /contacts/:id    # Same verbs as tasks
/// └── /notes, /notes/:id          # Same verbs as tasks
/// ```
///
/// Write endpoints identify the caller from the `X-User-Id` header inside
/// the handler; reads are public. CORS is permissive (the original served a
/// browser frontend from another origin) and requests are logged via
/// tower-http's `TraceLayer`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/:id", get(routes::tasks::get_task))
        .route("/tasks/:id", put(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/contacts", get(routes::contacts::list_contacts))
        .route("/contacts", post(routes::contacts::create_contact))
        .route("/contacts/:id", get(routes::contacts::get_contact))
        .route("/contacts/:id", put(routes::contacts::update_contact))
        .route("/contacts/:id", delete(routes::contacts::delete_contact))
        .route("/notes", get(routes::notes::list_notes))
        .route("/notes", post(routes::notes::create_note))
        .route("/notes/:id", get(routes::notes::get_note))
        .route("/notes/:id", put(routes::notes::update_note))
        .route("/notes/:id", delete(routes::notes::delete_note))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
