/// Common test utilities for integration tests
///
/// Shared infrastructure for exercising the full router:
/// - Test database setup
/// - Router construction with a recording mock notifier
/// - User registration and login helpers

use axum::body::Body;
use axum::http::Request;
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig, MailConfig, SessionConfig};
use taskboard_shared::auth::{password, session};
use taskboard_shared::models::user::{CreateUser, Role, User};
use taskboard_shared::notify::mock::MockNotifier;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub notifier: Arc<MockNotifier>,
}

impl TestContext {
    /// Creates a new test context against the database in `DATABASE_URL`
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_notifier(Arc::new(MockNotifier::new())).await
    }

    /// Creates a test context with a specific notifier (e.g. a failing one)
    pub async fn with_notifier(notifier: Arc<MockNotifier>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/taskboard_test".to_string());

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: "integration-test-secret-0123456789abcdef".to_string(),
            },
            smtp: MailConfig {
                host: "localhost".to_string(),
                port: 1025,
                username: None,
                password: None,
                from: "Taskboard <noreply@taskboard.example>".to_string(),
            },
        };

        let db = PgPool::connect(&database_url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../taskboard-shared/migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone(), notifier.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            notifier,
        })
    }

    /// Creates a user directly in the store and returns it with a session token
    pub async fn create_user_with_token(&self, role: Role) -> anyhow::Result<(User, String)> {
        let suffix = Uuid::new_v4();
        let user = User::create(
            &self.db,
            CreateUser {
                username: format!("user-{}", suffix),
                email: format!("user-{}@example.com", suffix),
                password_hash: password::hash_password("test-password")?,
                role,
            },
        )
        .await?;

        let token =
            session::create_session_token(user.id, user.role, false, &self.config.session.secret)?;

        Ok((user, token))
    }

    /// Returns an authorization header value for the given token
    pub fn auth_header(token: &str) -> String {
        format!("Bearer {}", token)
    }
}

/// Builds a JSON POST request
pub fn json_post(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", TestContext::auth_header(token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("request construction")
}

/// Builds an authenticated GET request
pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", TestContext::auth_header(token))
        .body(Body::empty())
        .expect("request construction")
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");

    serde_json::from_slice(&body).expect("body is JSON")
}
