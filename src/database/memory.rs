use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewNote, NewProject, NewTask, NewUser, Note, NoteChanges, Project, ProjectChanges, Task,
    TaskChanges, User,
};
use crate::database::store::{NoteStore, ProjectStore, Store, StoreResult, TaskStore, UserStore};

/// Process-local `Store` with the same observable semantics as `PgStore`.
///
/// Rows are kept in insertion order so list endpoints are deterministic.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
    notes: RwLock<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<Uuid> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("email already exists".to_string()));
        }

        let id = Uuid::new_v4();
        users.push(User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password: user.password_hash,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound("user not found".to_string()))
    }

    async fn get_user_by_id(&self, id: Uuid) -> StoreResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound("user not found".to_string()))
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: NewProject) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.projects.write().await.push(Project {
            id,
            user_id: project.user_id,
            title: project.title,
            description: project.description,
            priority: project.priority,
            deadline: project.deadline,
            date_created: now,
            last_edited: now,
        });
        Ok(id)
    }

    async fn get_projects_by_user_id(&self, owner: Uuid) -> StoreResult<Vec<Project>> {
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == owner)
            .cloned()
            .collect())
    }

    async fn get_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<Project> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id && p.user_id == owner)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound("project not found".to_string()))
    }

    async fn update_project_by_id(
        &self,
        changes: ProjectChanges,
        id: Uuid,
        owner: Uuid,
    ) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(DatabaseError::NoFieldsToUpdate);
        }
        let mut projects = self.projects.write().await;
        if let Some(project) = projects.iter_mut().find(|p| p.id == id && p.user_id == owner) {
            changes.apply_to(project);
        }
        Ok(())
    }

    async fn delete_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<()> {
        self.projects
            .write()
            .await
            .retain(|p| !(p.id == id && p.user_id == owner));
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, task: NewTask) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.tasks.write().await.push(Task {
            id,
            linked_project_id: task.linked_project_id,
            description: task.description,
            completed: task.completed,
        });
        Ok(id)
    }

    async fn get_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| t.linked_project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_task_by_id(&self, id: Uuid) -> StoreResult<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound("task not found".to_string()))
    }

    async fn update_task_by_id(&self, changes: TaskChanges, id: Uuid) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(DatabaseError::NoFieldsToUpdate);
        }
        let mut tasks = self.tasks.write().await;
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            changes.apply_to(task);
        }
        Ok(())
    }

    async fn delete_task_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.tasks.write().await.retain(|t| t.id != id);
        Ok(())
    }

    async fn delete_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()> {
        self.tasks
            .write()
            .await
            .retain(|t| t.linked_project_id != project_id);
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, note: NewNote) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.notes.write().await.push(Note {
            id,
            user_id: note.user_id,
            linked_project_id: note.linked_project_id,
            title: note.title,
            content: note.content,
            favorited: note.favorited,
            tags: note.tags,
            date_created: now,
            last_edited: now,
        });
        Ok(id)
    }

    async fn get_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Note>> {
        Ok(self
            .notes
            .read()
            .await
            .iter()
            .filter(|n| n.linked_project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_note_by_id(&self, id: Uuid) -> StoreResult<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound("note not found".to_string()))
    }

    async fn update_note_by_id(&self, changes: NoteChanges, id: Uuid) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(DatabaseError::NoFieldsToUpdate);
        }
        let mut notes = self.notes.write().await;
        if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
            changes.apply_to(note);
        }
        Ok(())
    }

    async fn delete_note_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.notes.write().await.retain(|n| n.id != id);
        Ok(())
    }

    async fn delete_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()> {
        self.notes
            .write()
            .await
            .retain(|n| n.linked_project_id != project_id);
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
