/// Application state and router builder
///
/// Shared state is constructed once at startup and passed explicitly into
/// every handler via Axum's `State` extractor; there are no process-wide
/// singletons for the store, the session secret, or the mailer.
///
/// # Router
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// ├── /auth/
/// │   ├── POST /register         # Public
/// │   ├── POST /login            # Public
/// │   └── GET  /logout           # Authenticated
/// ├── /dashboard                 # Authenticated, role-scoped aggregates
/// ├── /projects/create           # Authenticated, Admin/Manager
/// ├── /tasks/create[/:project_id]# Authenticated, Admin/Manager
/// └── /api/
///     ├── /task-stats            # Authenticated
///     └── /priority-stats        # Authenticated
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::{
    auth::{context::AuthContext, session},
    notify::Notifier,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request; the pool and notifier are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Notification port (SMTP in production, a mock in tests)
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            notifier,
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health and anonymous auth
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login));

    // Everything else requires a valid session token
    let authenticated_routes = Router::new()
        .route("/auth/logout", get(routes::auth::logout))
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/projects/create", post(routes::projects::create_project))
        .route(
            "/tasks/create",
            get(routes::tasks::task_form).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/create/:project_id",
            get(routes::tasks::task_form_for_project)
                .post(routes::tasks::create_task_for_project),
        )
        .route("/api/task-stats", get(routes::stats::task_stats))
        .route("/api/priority-stats", get(routes::stats::priority_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(SecurityHeadersLayer::new())
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Extracts and validates the bearer session token, then injects an
/// `AuthContext` into request extensions.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Please log in to access this page.".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::BadRequest("Expected Bearer token".to_string())
    })?;

    let claims = session::validate_session_token(token, state.session_secret())?;

    req.extensions_mut()
        .insert(AuthContext::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}
