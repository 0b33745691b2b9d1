// handlers/protected/tasks.rs - /api/v1/tasks/*

use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use super::ensure_linked_project;
use crate::api::{parse_id, ValidatedJson};
use crate::database::models::{supplied_id, CreateTaskPayload, Task, TaskChanges};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

const NO_PROJECT: &str = "project does not exist to link task to";

#[derive(Debug, Serialize)]
pub struct TaskCreated {
    #[serde(rename = "taskID")]
    pub task_id: Uuid,
}

/// POST /tasks/create-new-task
pub async fn create_new_task(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTaskPayload>,
) -> ApiResult<TaskCreated> {
    ensure_linked_project(&state, payload.linked_project_id, auth.user_id, NO_PROJECT).await?;

    let task_id = state.store.create_task(payload.into()).await?;
    Ok(ApiResponse::created(TaskCreated { task_id }))
}

/// GET /tasks/get-tasks-by-linked-project-ID/:projectID
pub async fn get_tasks_by_linked_project_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Vec<Task>> {
    let project_id = parse_id(&project_id, "project")?;
    let tasks = state
        .store
        .get_tasks_by_linked_project_id(project_id)
        .await?;
    Ok(ApiResponse::success(tasks))
}

/// GET /tasks/get-task-by-ID/:taskID
pub async fn get_task_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> ApiResult<Task> {
    let task_id = parse_id(&task_id, "task")?;
    let task = state.store.get_task_by_id(task_id).await?;
    Ok(ApiResponse::success(task))
}

/// PUT /tasks/update-task-by-ID/:taskID
pub async fn update_task_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    ValidatedJson(changes): ValidatedJson<TaskChanges>,
) -> ApiResult<()> {
    let task_id = parse_id(&task_id, "task")?;

    if let Some(project_id) = supplied_id(changes.linked_project_id) {
        ensure_linked_project(&state, project_id, auth.user_id, NO_PROJECT).await?;
    }

    state.store.update_task_by_id(changes, task_id).await?;
    Ok(ApiResponse::ok())
}

/// DELETE /tasks/delete-task-by-ID/:taskID
pub async fn delete_task_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> ApiResult<()> {
    let task_id = parse_id(&task_id, "task")?;

    match state.store.get_task_by_id(task_id).await {
        Ok(_) => {}
        Err(DatabaseError::NotFound(_)) => return Err(ApiError::bad_request("task does not exist")),
        Err(e) => return Err(e.into()),
    }

    state.store.delete_task_by_id(task_id).await?;
    Ok(ApiResponse::ok())
}
