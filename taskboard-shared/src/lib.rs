//! # Taskboard Shared Library
//!
//! This crate contains the types and business logic shared by the Taskboard
//! API server: database models, the role-based authorization policy, auth
//! primitives, and the notification port.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, projects, tasks) and aggregates
//! - `auth`: Password hashing, session tokens, and the authorization policy
//! - `notify`: Task-assignment notification port and transports
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod notify;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
