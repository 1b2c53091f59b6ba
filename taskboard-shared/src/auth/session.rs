/// Session token generation and validation
///
/// Sessions are stateless signed tokens (HS256) carrying the actor's id
/// and role. The login form's "remember" flag maps to token lifetime:
/// 24 hours by default, 30 days when remembered.
///
/// Logout is client-side discard; there is no server-side revocation list.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::session::{create_session_token, validate_session_token};
/// use taskboard_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "a-secret-that-is-at-least-32-bytes!!";
///
/// let token = create_session_token(user_id, Role::Manager, false, secret)?;
/// let claims = validate_session_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// assert_eq!(claims.role, Role::Manager);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// Issuer embedded in every session token
const ISSUER: &str = "taskboard";

/// Default session lifetime
const SESSION_HOURS: i64 = 24;

/// Session lifetime with the "remember" flag set
const REMEMBERED_SESSION_DAYS: i64 = 30;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Token failed validation (bad signature, malformed, wrong issuer)
    #[error("Invalid session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,
}

/// Session claims
///
/// Standard JWT claims plus the actor's role, so the authorization policy
/// can be evaluated without a user lookup on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "taskboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Actor role (custom claim)
    pub role: Role,
}

impl SessionClaims {
    /// Creates claims for a new session
    pub fn new(user_id: Uuid, role: Role, remember: bool) -> Self {
        let now = Utc::now();
        let lifetime = if remember {
            Duration::days(REMEMBERED_SESSION_DAYS)
        } else {
            Duration::hours(SESSION_HOURS)
        };

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            nbf: now.timestamp(),
            role,
        }
    }
}

/// Creates a signed session token
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn create_session_token(
    user_id: Uuid,
    role: Role,
    remember: bool,
    secret: &str,
) -> Result<String, SessionError> {
    let claims = SessionClaims::new(user_id, role, remember);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Validates a session token and returns its claims
///
/// Checks signature, expiry, not-before, and issuer.
///
/// # Errors
///
/// - `SessionError::Expired` for expired tokens
/// - `SessionError::ValidationError` for everything else
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let token = create_session_token(user_id, Role::Employee, false, SECRET)
            .expect("Token creation should succeed");

        let claims = validate_session_token(&token, SECRET).expect("Validation should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.iss, "taskboard");
    }

    #[test]
    fn test_remember_extends_lifetime() {
        let user_id = Uuid::new_v4();
        let short = SessionClaims::new(user_id, Role::Employee, false);
        let long = SessionClaims::new(user_id, Role::Employee, true);

        assert!(long.exp > short.exp);
        // Remembered sessions outlive the default by weeks, not seconds
        assert!(long.exp - short.exp > 60 * 60 * 24 * 20);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_session_token(Uuid::new_v4(), Role::Admin, false, SECRET)
            .expect("Token creation should succeed");

        let result = validate_session_token(&token, "another-secret-that-is-32-bytes!!");
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = validate_session_token("not.a.token", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = SessionClaims::new(Uuid::new_v4(), Role::Manager, false);
        claims.exp = claims.iat - 3600;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut claims = SessionClaims::new(Uuid::new_v4(), Role::Manager, false);
        claims.iss = "someone-else".to_string();

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_role_survives_roundtrip() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            let token = create_session_token(Uuid::new_v4(), role, true, SECRET).unwrap();
            let claims = validate_session_token(&token, SECRET).unwrap();
            assert_eq!(claims.role, role);
        }
    }
}
