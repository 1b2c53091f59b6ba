/// API route handlers
///
/// Route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, logout
/// - `dashboard`: Role-scoped aggregate view
/// - `projects`: Project creation
/// - `tasks`: Task creation workflow with notification
/// - `stats`: JSON analytics endpoints

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod stats;
pub mod tasks;
