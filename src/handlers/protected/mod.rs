// handlers/protected/mod.rs - handlers behind require_auth
//
// Every handler takes AuthUser explicitly; reaching one without the
// middleware yields the same 403 the middleware would have produced.

pub mod notes;
pub mod projects;
pub mod tasks;

use uuid::Uuid;

use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

/// Confirm `project_id` names a project owned by `owner`.
///
/// A missing project is the client's mistake (400 with `message`); any other
/// store failure stays a 500.
pub(crate) async fn ensure_linked_project(
    state: &AppState,
    project_id: Uuid,
    owner: Uuid,
    message: &str,
) -> Result<(), ApiError> {
    match state.store.get_project_by_id(project_id, owner).await {
        Ok(_) => Ok(()),
        Err(DatabaseError::NotFound(_)) => Err(ApiError::bad_request(message)),
        Err(e) => Err(e.into()),
    }
}
