use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{supplied, NewTask, Task, TaskChanges};
use crate::database::store::{StoreResult, TaskStore};
use crate::database::update_builder::UpdateBuilder;

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, task: NewTask) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO tasks (id, linked_project_id, description, completed) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(task.linked_project_id)
        .bind(&task.description)
        .bind(task.completed)
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    async fn get_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, linked_project_id, description, completed FROM tasks WHERE linked_project_id = $1 ORDER BY created_at",
        )
        .bind(project_id)
        .fetch_all(self.pool())
        .await?;

        Ok(tasks)
    }

    async fn get_task_by_id(&self, id: Uuid) -> StoreResult<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, linked_project_id, description, completed FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DatabaseError::not_found_or(e, "task not found"))
    }

    async fn update_task_by_id(&self, changes: TaskChanges, id: Uuid) -> StoreResult<()> {
        UpdateBuilder::new("tasks")
            .set_uuid("linked_project_id", changes.linked_project_id)
            .set_text("description", supplied(&changes.description))
            .set_bool("completed", changes.completed)
            .build(&[("id", id)])?
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn delete_task_by_id(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn delete_tasks_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE linked_project_id = $1")
            .bind(project_id)
            .execute(self.pool())
            .await?;
        tracing::debug!("Deleted {} tasks of project {}", result.rows_affected(), project_id);
        Ok(())
    }
}
