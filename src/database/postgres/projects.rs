use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{supplied, NewProject, Project, ProjectChanges};
use crate::database::store::{ProjectStore, StoreResult};
use crate::database::update_builder::UpdateBuilder;

const PROJECT_COLUMNS: &str =
    "id, user_id, title, description, priority, deadline, date_created, last_edited";

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(&self, project: NewProject) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO projects (id, user_id, title, description, priority, deadline) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(project.user_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.priority)
        .bind(&project.deadline)
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    async fn get_projects_by_user_id(&self, owner: Uuid) -> StoreResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY date_created",
            PROJECT_COLUMNS
        ))
        .bind(owner)
        .fetch_all(self.pool())
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<Project> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1 AND user_id = $2",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DatabaseError::not_found_or(e, "project not found"))
    }

    async fn update_project_by_id(
        &self,
        changes: ProjectChanges,
        id: Uuid,
        owner: Uuid,
    ) -> StoreResult<()> {
        UpdateBuilder::new("projects")
            .set_text("title", supplied(&changes.title))
            .set_text("description", supplied(&changes.description))
            .set_text("priority", supplied(&changes.priority))
            .set_text("deadline", supplied(&changes.deadline))
            .touch("last_edited")
            .build(&[("id", id), ("user_id", owner)])?
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn delete_project_by_id(&self, id: Uuid, owner: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
