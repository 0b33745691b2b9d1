// handlers/protected/projects.rs - /api/v1/projects/*

use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use crate::api::{parse_id, ValidatedJson};
use crate::database::models::{CreateProjectPayload, Project, ProjectChanges};
use crate::database::DatabaseError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectCreated {
    #[serde(rename = "projectID")]
    pub project_id: Uuid,
}

/// POST /projects/create-new-project
pub async fn create_new_project(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProjectPayload>,
) -> ApiResult<ProjectCreated> {
    let project_id = state
        .store
        .create_project(payload.into_new(auth.user_id))
        .await?;

    tracing::debug!("User {} created project {}", auth.user_id, project_id);
    Ok(ApiResponse::created(ProjectCreated { project_id }))
}

/// GET /projects/get-projects-by-user-ID
pub async fn get_projects_by_user_id(
    auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Vec<Project>> {
    let projects = state.store.get_projects_by_user_id(auth.user_id).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /projects/get-project-by-ID/:projectID
pub async fn get_project_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Project> {
    let project_id = parse_id(&project_id, "project")?;
    let project = state
        .store
        .get_project_by_id(project_id, auth.user_id)
        .await?;
    Ok(ApiResponse::success(project))
}

/// PUT /projects/update-project-by-ID/:projectID
pub async fn update_project_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    ValidatedJson(changes): ValidatedJson<ProjectChanges>,
) -> ApiResult<()> {
    let project_id = parse_id(&project_id, "project")?;
    state
        .store
        .update_project_by_id(changes, project_id, auth.user_id)
        .await?;
    Ok(ApiResponse::ok())
}

/// DELETE /projects/delete-project-by-ID/:projectID
///
/// Linked tasks go first, then the project, as two separate statements.
/// Notes are left in place.
pub async fn delete_project_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<()> {
    let project_id = parse_id(&project_id, "project")?;

    // Only the owner's project may take its tasks with it.
    match state.store.get_project_by_id(project_id, auth.user_id).await {
        Ok(_) => {}
        Err(DatabaseError::NotFound(_)) => {
            tracing::debug!("Delete of unknown project {} is a no-op", project_id);
            return Ok(ApiResponse::ok());
        }
        Err(e) => return Err(e.into()),
    }

    state
        .store
        .delete_tasks_by_linked_project_id(project_id)
        .await?;
    state
        .store
        .delete_project_by_id(project_id, auth.user_id)
        .await?;

    tracing::debug!("User {} deleted project {}", auth.user_id, project_id);
    Ok(ApiResponse::ok())
}
