/// Authentication and authorization
///
/// This module contains everything identity-related:
///
/// - `password`: Argon2id hashing and verification
/// - `session`: Signed session tokens (the "remember" flag maps to lifetime)
/// - `policy`: The pure role-based authorization policy
/// - `context`: The authenticated actor attached to each request

pub mod context;
pub mod password;
pub mod policy;
pub mod session;
