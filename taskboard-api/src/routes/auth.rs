/// Authentication endpoints
///
/// - `POST /auth/register` - Register a new account
/// - `POST /auth/login` - Verify credentials and open a session
/// - `GET  /auth/logout` - End the session
///
/// Login failures are deliberately indistinguishable: an unknown username
/// and a wrong password produce the same message, so the endpoint cannot
/// be used to enumerate accounts.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{context::AuthContext, password, policy, session},
    models::user::{CreateUser, Role, User},
};
use uuid::Uuid;
use validator::Validate;

/// Generic message for every failed login attempt
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Default landing page after login
const DEFAULT_LANDING: &str = "/dashboard";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Requested role (defaults to Employee; Admin is rejected)
    #[serde(default)]
    pub role: Role,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user ID
    pub user_id: Uuid,

    /// Where the client should go next
    pub redirect: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,

    /// Password
    pub password: String,

    /// Extends the session from 24 hours to 30 days
    #[serde(default)]
    pub remember: bool,
}

/// Query parameters accepted by the login endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Post-login redirect target, validated before use
    pub next: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: Uuid,

    /// Session token (bearer)
    pub token: String,

    /// Where the client should go next
    pub redirect: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Where the client should go next
    pub redirect: String,
}

/// Validates a caller-supplied redirect target
///
/// Only same-origin-relative paths are accepted: the target must start
/// with a single `/`. Absolute URLs and scheme-relative `//host` forms
/// fall back to the dashboard.
fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => DEFAULT_LANDING.to_string(),
    }
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "username": "alice", "email": "alice@example.com",
///   "password": "s3cret!", "role": "manager" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: field validation failed, or role=admin
/// - `409 Conflict`: username or email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(validation_error)?;

    // Admin accounts are provisioned out of band, never self-assigned
    if !policy::registrable_role(req.role) {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "role".to_string(),
            message: "This role cannot be self-assigned".to_string(),
        }]));
    }

    let password_hash = password::hash_password(&req.password)?;

    // Uniqueness is enforced by the store; a constraint violation maps to
    // a field-scoped 409 in the error layer
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User registered");

    Ok(Json(RegisterResponse {
        user_id: user.id,
        redirect: "/auth/login".to_string(),
    }))
}

/// Verify credentials and open a session
///
/// # Endpoint
///
/// ```text
/// POST /auth/login?next=/dashboard
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret!", "remember": true }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: bad credentials (one message for all causes)
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = User::find_by_username(&state.db, &req.username).await?;

    // One failure path for unknown user and wrong password
    let user = match user {
        Some(user) if password::verify_password(&req.password, &user.password_hash)? => user,
        _ => return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())),
    };

    let token =
        session::create_session_token(user.id, user.role, req.remember, state.session_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        token,
        redirect: sanitize_next(query.next.as_deref()),
    }))
}

/// End the session
///
/// Session tokens are stateless; logout is the client discarding its
/// token. The endpoint exists so the flow mirrors the login one.
pub async fn logout(Extension(auth): Extension<AuthContext>) -> ApiResult<Json<LogoutResponse>> {
    tracing::info!(user_id = %auth.user_id, "User logged out");

    Ok(Json(LogoutResponse {
        redirect: "/".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_next_accepts_relative_path() {
        assert_eq!(sanitize_next(Some("/dashboard")), "/dashboard");
        assert_eq!(sanitize_next(Some("/tasks/create")), "/tasks/create");
    }

    #[test]
    fn test_sanitize_next_rejects_absolute_url() {
        assert_eq!(sanitize_next(Some("http://evil.example/x")), "/dashboard");
        assert_eq!(sanitize_next(Some("https://evil.example")), "/dashboard");
    }

    #[test]
    fn test_sanitize_next_rejects_scheme_relative() {
        assert_eq!(sanitize_next(Some("//evil.example/x")), "/dashboard");
    }

    #[test]
    fn test_sanitize_next_defaults_when_absent() {
        assert_eq!(sanitize_next(None), "/dashboard");
        assert_eq!(sanitize_next(Some("")), "/dashboard");
    }

    #[test]
    fn test_register_request_rejects_short_username() {
        let req = RegisterRequest {
            username: "ab".to_string(),
            email: "ab@example.com".to_string(),
            password: "longenough".to_string(),
            role: Role::Employee,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
            role: Role::Employee,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_default_role_is_employee() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","email":"a@example.com","password":"s3cret!"}"#,
        )
        .unwrap();

        assert_eq!(req.role, Role::Employee);
    }

    #[test]
    fn test_login_request_remember_defaults_false() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();

        assert!(!req.remember);
    }
}
