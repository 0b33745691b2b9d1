use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::PgStore;
use crate::database::manager::DatabaseError;
use crate::database::models::{supplied, NewNote, Note, NoteChanges};
use crate::database::store::{NoteStore, StoreResult};
use crate::database::update_builder::UpdateBuilder;

const NOTE_COLUMNS: &str =
    "id, user_id, linked_project_id, title, content, favorited, tags, date_created, last_edited";

#[async_trait]
impl NoteStore for PgStore {
    async fn create_note(&self, note: NewNote) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO notes (id, user_id, linked_project_id, title, content, favorited, tags) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(note.user_id)
        .bind(note.linked_project_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.favorited)
        .bind(Json(&note.tags))
        .execute(self.pool())
        .await?;

        Ok(id)
    }

    async fn get_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE linked_project_id = $1 ORDER BY date_created",
            NOTE_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(self.pool())
        .await?;

        Ok(notes)
    }

    async fn get_note_by_id(&self, id: Uuid) -> StoreResult<Note> {
        sqlx::query_as::<_, Note>(&format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS))
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(|e| DatabaseError::not_found_or(e, "note not found"))
    }

    async fn update_note_by_id(&self, changes: NoteChanges, id: Uuid) -> StoreResult<()> {
        let tags = changes.tags.map(serde_json::Value::from);

        UpdateBuilder::new("notes")
            .set_uuid("linked_project_id", changes.linked_project_id)
            .set_text("title", supplied(&changes.title))
            .set_text("content", supplied(&changes.content))
            .set_bool("favorited", changes.favorited)
            .set_json("tags", tags)
            .touch("last_edited")
            .build(&[("id", id)])?
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn delete_note_by_id(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn delete_notes_by_linked_project_id(&self, project_id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM notes WHERE linked_project_id = $1")
            .bind(project_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
