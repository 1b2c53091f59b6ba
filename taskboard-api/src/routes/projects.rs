/// Project creation endpoint
///
/// # Endpoint
///
/// ```text
/// POST /projects/create
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "name": "Website Redesign", "description": "Q3 refresh" }
/// ```
///
/// Admin-created projects start without a manager; Manager-created
/// projects are owned by their creator.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{context::AuthContext, policy},
    models::project::{CreateProject, Project},
};
use uuid::Uuid;
use validator::Validate;

/// Project creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 140, message = "Project name must be 1-140 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Project creation response
#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    /// New project ID
    pub project_id: Uuid,

    /// Where the client should go next
    pub redirect: String,
}

/// Create a new project
///
/// # Errors
///
/// - `403 Forbidden`: caller is an Employee
/// - `422 Unprocessable Entity`: field validation failed
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<CreateProjectResponse>> {
    if !policy::can_create_project(auth.role) {
        return Err(ApiError::Forbidden(
            "You do not have permission to create projects.".to_string(),
        ));
    }

    req.validate().map_err(validation_error)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            manager_id: policy::manager_on_create(auth.role, auth.user_id),
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, created_by = %auth.user_id, "Project created");

    Ok(Json(CreateProjectResponse {
        project_id: project.id,
        redirect: "/dashboard".to_string(),
    }))
}
