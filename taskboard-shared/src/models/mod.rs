/// Database models
///
/// This module contains the persistent entities of Taskboard:
///
/// - `user`: User accounts with a closed role enum
/// - `project`: Projects, optionally owned by a manager
/// - `task`: Tasks with status/priority enums and in-memory aggregates

pub mod project;
pub mod task;
pub mod user;
