// handlers/protected/notes.rs - /api/v1/notes/*

use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use super::ensure_linked_project;
use crate::api::{parse_id, ValidatedJson};
use crate::database::models::{supplied_id, CreateNotePayload, Note, NoteChanges};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

const NO_PROJECT: &str = "project ID does not exist";

#[derive(Debug, Serialize)]
pub struct NoteCreated {
    #[serde(rename = "noteID")]
    pub note_id: Uuid,
}

/// POST /notes/create-new-note
pub async fn create_new_note(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNotePayload>,
) -> ApiResult<NoteCreated> {
    ensure_linked_project(&state, payload.linked_project_id, auth.user_id, NO_PROJECT).await?;

    let note_id = state
        .store
        .create_note(payload.into_new(auth.user_id))
        .await?;
    Ok(ApiResponse::created(NoteCreated { note_id }))
}

/// GET /notes/get-notes-by-linked-project-ID/:projectID
pub async fn get_notes_by_linked_project_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Vec<Note>> {
    let project_id = parse_id(&project_id, "linked project")?;
    if project_id.is_nil() {
        return Err(ApiError::bad_request("null linked project ID"));
    }
    ensure_linked_project(&state, project_id, auth.user_id, NO_PROJECT).await?;

    let notes = state
        .store
        .get_notes_by_linked_project_id(project_id)
        .await?;
    Ok(ApiResponse::success(notes))
}

/// GET /notes/get-notes-by-ID/:noteID
pub async fn get_note_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<Note> {
    let note_id = parse_id(&note_id, "note")?;
    let note = state.store.get_note_by_id(note_id).await?;
    Ok(ApiResponse::success(note))
}

/// PUT /notes/update-note-by-ID/:noteID
pub async fn update_note_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
    ValidatedJson(changes): ValidatedJson<NoteChanges>,
) -> ApiResult<()> {
    let note_id = parse_id(&note_id, "note")?;
    ensure_note(&state, note_id, "note ID does not exist").await?;

    if let Some(project_id) = supplied_id(changes.linked_project_id) {
        ensure_linked_project(&state, project_id, auth.user_id, NO_PROJECT).await?;
    }

    state.store.update_note_by_id(changes, note_id).await?;
    Ok(ApiResponse::ok())
}

/// DELETE /notes/delete-note-by-ID/:noteID
pub async fn delete_note_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> ApiResult<()> {
    let note_id = parse_id(&note_id, "note")?;
    ensure_note(&state, note_id, "note does not exist").await?;

    state.store.delete_note_by_id(note_id).await?;
    Ok(ApiResponse::ok())
}

async fn ensure_note(state: &AppState, note_id: Uuid, message: &str) -> Result<(), ApiError> {
    match state.store.get_note_by_id(note_id).await {
        Ok(_) => Ok(()),
        Err(DatabaseError::NotFound(_)) => Err(ApiError::bad_request(message)),
        Err(e) => Err(e.into()),
    }
}
