/// Common test utilities for integration tests
///
/// Shared infrastructure for router-level tests:
/// - Test context construction (with and without a live database)
/// - Request helpers that drive the router via `tower::Service`
/// - Unique email generation so repeated runs don't collide

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use taskyard_api::app::{build_router, AppState};
use taskyard_api::config::{ApiConfig, Config, DatabaseConfig};
use tower::Service as _;

/// Test context containing the database pool and the built router
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

fn test_config(url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: url.to_string(),
            max_connections: 5,
        },
    }
}

impl TestContext {
    /// Creates a context against a live database and runs migrations
    ///
    /// Requires `DATABASE_URL` to point at a PostgreSQL instance.
    pub async fn connect() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL")?;

        let db = PgPool::connect(&url).await?;

        // Path relative to the crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), test_config(&url));
        Ok(Self {
            db,
            app: build_router(state),
        })
    }

    /// Creates a context whose pool never connects
    ///
    /// Good enough for endpoints that reject the request before touching
    /// the database (health check, missing/invalid header cases).
    pub fn lazy() -> Self {
        let url = "postgresql://localhost/taskyard_unreachable";
        let db = PgPoolOptions::new().connect_lazy(url).expect("lazy pool");

        let state = AppState::new(db.clone(), test_config(url));
        Self {
            db,
            app: build_router(state),
        }
    }

    /// Sends a request through the router and returns status plus parsed body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user_id: Option<i32>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(id) = user_id {
            builder = builder.header("X-User-Id", id.to_string());
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers a user with a unique email and returns its id
    pub async fn register_user(&self, name: &str) -> i32 {
        let email = unique_email(name);
        let (status, body) = self
            .send(
                "POST",
                "/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["id"].as_i64().unwrap() as i32
    }

    /// Creates a contact owned by `user_id` and returns its id
    pub async fn create_contact(&self, user_id: i32, name: &str) -> i32 {
        let (status, body) = self
            .send(
                "POST",
                "/contacts",
                Some(user_id),
                Some(serde_json::json!({
                    "name": name,
                    "email": unique_email(name),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create contact failed: {}", body);
        body["id"].as_i64().unwrap() as i32
    }
}

/// Produces an email unlikely to collide across test runs
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}@example.com", prefix.to_lowercase(), nanos)
}
