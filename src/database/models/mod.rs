pub mod note;
pub mod project;
pub mod task;
pub mod user;

pub use note::{CreateNotePayload, NewNote, Note, NoteChanges};
pub use project::{CreateProjectPayload, NewProject, Project, ProjectChanges};
pub use task::{CreateTaskPayload, NewTask, Task, TaskChanges};
pub use user::{LoginUserPayload, NewUser, RegisterUserPayload, User};

use uuid::Uuid;
use validator::ValidationError;

/// An optional text field counts as supplied only when it is present and non-empty.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// An optional identifier counts as supplied only when it is present and not nil.
pub fn supplied_id(value: Option<Uuid>) -> Option<Uuid> {
    value.filter(|id| !id.is_nil())
}

pub(crate) fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("required").with_message("is required".into()));
    }
    Ok(())
}
