/// Role-scoped dashboard endpoint
///
/// One endpoint, three shapes. Each role sees aggregates over the slice
/// of the data it is allowed to act on:
///
/// - Admin: everything (user, project and task totals)
/// - Manager: projects they manage and the tasks inside them
/// - Employee: tasks assigned to them
///
/// # Endpoint
///
/// ```text
/// GET /dashboard
/// Authorization: Bearer <token>
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use serde::Serialize;
use taskboard_shared::{
    auth::{context::AuthContext, policy},
    models::{
        project::Project,
        task::{StatusCounts, Task},
        user::{Role, User},
    },
};

/// Dashboard response
///
/// Counts that do not apply to the caller's role are omitted from the
/// JSON body rather than reported as zero.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Caller's role, echoed so clients can pick a view
    pub role: Role,

    /// Total registered users (Admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_users: Option<i64>,

    /// Total projects in scope (Admin, Manager)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_projects: Option<i64>,

    /// Total tasks in scope
    pub total_tasks: i64,

    /// Task counts broken down by status
    pub status_counts: StatusCounts,

    /// Projects in scope (Admin, Manager)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,

    /// Tasks in scope
    pub tasks: Vec<Task>,
}

/// Role-scoped dashboard handler
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardResponse>> {
    let tasks =
        Task::list_in_scope(&state.db, policy::task_scope(auth.role, auth.user_id)).await?;
    let status_counts = StatusCounts::from_tasks(&tasks);
    let total_tasks = status_counts.total() as i64;

    let projects = match policy::project_scope(auth.role, auth.user_id) {
        policy::ProjectScope::None => None,
        scope => Some(Project::list_in_scope(&state.db, scope).await?),
    };

    let total_users = match auth.role {
        Role::Admin => Some(User::count(&state.db).await?),
        _ => None,
    };

    Ok(Json(DashboardResponse {
        role: auth.role,
        total_users,
        total_projects: projects.as_ref().map(|p| p.len() as i64),
        total_tasks,
        status_counts,
        projects,
        tasks,
    }))
}
