/// Authenticated actor context
///
/// The API's auth middleware validates the session token and inserts an
/// `AuthContext` into request extensions; handlers extract it to evaluate
/// the authorization policy.

use uuid::Uuid;

use crate::models::user::Role;

/// The authenticated identity issuing the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Actor's user ID
    pub user_id: Uuid,

    /// Actor's role at session creation time
    pub role: Role,
}

impl AuthContext {
    /// Creates a context from validated session claims
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_holds_identity() {
        let id = Uuid::new_v4();
        let ctx = AuthContext::new(id, Role::Manager);

        assert_eq!(ctx.user_id, id);
        assert_eq!(ctx.role, Role::Manager);
    }
}
