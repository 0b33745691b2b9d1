use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewNote, NewProject, NewTask, NewUser, Note, NoteChanges, Project, ProjectChanges, Task,
    TaskChanges, User,
};

pub type StoreResult<T> = Result<T, DatabaseError>;

/// Credential records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `Conflict` when the email is already registered.
    async fn create_user(&self, user: NewUser) -> StoreResult<Uuid>;
    async fn get_user_by_email(&self, email: &str) -> StoreResult<User>;
    async fn get_user_by_id(&self, id: Uuid) -> StoreResult<User>;
}

/// Owner-scoped projects. Every lookup and write is filtered by `owner`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, project: NewProject) -> StoreResult<Uuid>;
    async fn get_projects_by_user_id(&self, owner: Uuid) -> StoreResult<Vec<Project>>;
    async fn get_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<Project>;
    async fn update_project_by_id(
        &self,
        changes: ProjectChanges,
        id: Uuid,
        owner: Uuid,
    ) -> StoreResult<()>;
    async fn delete_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, task: NewTask) -> StoreResult<Uuid>;
    async fn get_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;
    async fn get_task_by_id(&self, id: Uuid) -> StoreResult<Task>;
    async fn update_task_by_id(&self, changes: TaskChanges, id: Uuid) -> StoreResult<()>;
    async fn delete_task_by_id(&self, id: Uuid) -> StoreResult<()>;
    async fn delete_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, note: NewNote) -> StoreResult<Uuid>;
    async fn get_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Note>>;
    async fn get_note_by_id(&self, id: Uuid) -> StoreResult<Note>;
    async fn update_note_by_id(&self, changes: NoteChanges, id: Uuid) -> StoreResult<()>;
    async fn delete_note_by_id(&self, id: Uuid) -> StoreResult<()>;
    async fn delete_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait Store: UserStore + ProjectStore + TaskStore + NoteStore {
    async fn ping(&self) -> StoreResult<()>;
}
