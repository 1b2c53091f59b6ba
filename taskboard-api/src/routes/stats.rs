/// JSON analytics endpoints
///
/// Both endpoints aggregate over the caller's visible task set, so an
/// Employee's chart never leaks other people's workload.
///
/// # Endpoints
///
/// ```text
/// GET /api/task-stats      → {"pending": 3, "in_progress": 1, "completed": 5}
/// GET /api/priority-stats  → {"low": 2, "medium": 4, "high": 3}
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskboard_shared::{
    auth::{context::AuthContext, policy},
    models::task::{PriorityCounts, StatusCounts, Task},
};

/// Per-status task counts for the caller's scope
pub async fn task_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<StatusCounts>> {
    let tasks =
        Task::list_in_scope(&state.db, policy::task_scope(auth.role, auth.user_id)).await?;

    Ok(Json(StatusCounts::from_tasks(&tasks)))
}

/// Per-priority task counts for the caller's scope
pub async fn priority_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PriorityCounts>> {
    let tasks =
        Task::list_in_scope(&state.db, policy::task_scope(auth.role, auth.user_id)).await?;

    Ok(Json(PriorityCounts::from_tasks(&tasks)))
}
