/// Task creation workflow
///
/// Two entry points share one implementation: `/tasks/create` offers a
/// free project choice, `/tasks/create/:project_id` pre-binds the task
/// to one project. Each has a GET form-data endpoint and a POST create
/// endpoint.
///
/// Creating a task with an assignee triggers a best-effort email
/// notification. The task write always wins: a failed notification is
/// reported as a `warning` on an otherwise successful response.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{context::AuthContext, policy},
    models::{
        project::Project,
        task::{normalize_selection, CreateTask, Task, TaskPriority, TaskStatus},
        user::User,
    },
    notify::AssignmentNotice,
};
use uuid::Uuid;
use validator::Validate;

/// Form data for the task creation view
///
/// Lists the selectable assignees and the projects the caller may file
/// tasks under.
#[derive(Debug, Serialize)]
pub struct TaskFormResponse {
    /// Users a task can be assigned to
    pub assignable_users: Vec<User>,

    /// Projects visible to the caller
    pub projects: Vec<Project>,

    /// Pre-selected project, when reached via `/tasks/create/:project_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 140, message = "Task title must be 1-140 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to pending)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Project to attach to; the nil UUID means "none"
    pub project_id: Option<Uuid>,

    /// Assignee; the nil UUID means "unassigned"
    pub assigned_to: Option<Uuid>,
}

/// Task creation response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    /// New task ID
    pub task_id: Uuid,

    /// Where the client should go next
    pub redirect: String,

    /// Set when the task was created but the assignment notification
    /// could not be delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Form data for `/tasks/create`
pub async fn task_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskFormResponse>> {
    require_task_creator(&auth)?;

    Ok(Json(TaskFormResponse {
        assignable_users: User::list(&state.db).await?,
        projects: Project::list_in_scope(&state.db, policy::project_scope(auth.role, auth.user_id))
            .await?,
        project: None,
    }))
}

/// Form data for `/tasks/create/:project_id`
pub async fn task_form_for_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<TaskFormResponse>> {
    require_task_creator(&auth)?;

    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(TaskFormResponse {
        assignable_users: User::list(&state.db).await?,
        projects: Project::list_in_scope(&state.db, policy::project_scope(auth.role, auth.user_id))
            .await?,
        project: Some(project),
    }))
}

/// Create a task with a free project choice
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<CreateTaskResponse>> {
    let project_id = normalize_selection(req.project_id);
    create_task_inner(&state, &auth, req, project_id).await
}

/// Create a task bound to one project
///
/// The path parameter wins over any `project_id` in the body.
pub async fn create_task_for_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<CreateTaskResponse>> {
    if Project::find_by_id(&state.db, project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    create_task_inner(&state, &auth, req, Some(project_id)).await
}

/// Rejects callers who may not create tasks
fn require_task_creator(auth: &AuthContext) -> ApiResult<()> {
    if policy::can_create_task(auth.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not have permission to create tasks.".to_string(),
        ))
    }
}

async fn create_task_inner(
    state: &AppState,
    auth: &AuthContext,
    req: CreateTaskRequest,
    project_id: Option<Uuid>,
) -> ApiResult<Json<CreateTaskResponse>> {
    require_task_creator(auth)?;

    req.validate().map_err(validation_error)?;

    let assigned_to = normalize_selection(req.assigned_to);

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            due_date: req.due_date,
            project_id,
            assigned_to,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, created_by = %auth.user_id, "Task created");

    let warning = match assigned_to {
        Some(assignee_id) => notify_assignee(state, &task, assignee_id).await,
        None => None,
    };

    Ok(Json(CreateTaskResponse {
        task_id: task.id,
        redirect: "/dashboard".to_string(),
        warning,
    }))
}

/// Attempts the assignment notification, returning a warning on failure
///
/// The task is already committed here; nothing on this path may turn
/// into an error response.
async fn notify_assignee(state: &AppState, task: &Task, assignee_id: Uuid) -> Option<String> {
    let assignee = match User::find_by_id(&state.db, assignee_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(task_id = %task.id, %assignee_id, "Assignee vanished before notification");
            return Some("Task created, but the notification email could not be sent.".to_string());
        }
        Err(err) => {
            tracing::warn!(task_id = %task.id, error = %err, "Assignee lookup failed");
            return Some("Task created, but the notification email could not be sent.".to_string());
        }
    };

    let notice = AssignmentNotice {
        recipient_email: assignee.email.clone(),
        recipient_name: assignee.username.clone(),
        task_title: task.title.clone(),
        priority: task.priority,
        due_date: task.due_date,
        description: task.description.clone(),
    };

    match state.notifier.task_assigned(&notice).await {
        Ok(()) => {
            tracing::debug!(task_id = %task.id, recipient = %assignee.email, "Assignment notification sent");
            None
        }
        Err(err) => {
            tracing::warn!(task_id = %task.id, error = %err, "Assignment notification failed");
            Some("Task created, but the notification email could not be sent.".to_string())
        }
    }
}
