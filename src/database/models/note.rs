use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{not_nil, supplied, supplied_id};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "linkedProjectID")]
    pub linked_project_id: Uuid,
    pub title: String,
    pub content: String,
    pub favorited: bool,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub date_created: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: Uuid,
    pub linked_project_id: Uuid,
    pub title: String,
    pub content: String,
    pub favorited: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateNotePayload {
    #[serde(rename = "linkedProjectID")]
    #[validate(custom(function = "not_nil"))]
    pub linked_project_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub content: String,
    pub favorited: bool,
    pub tags: Vec<String>,
}

impl CreateNotePayload {
    pub fn into_new(self, user_id: Uuid) -> NewNote {
        NewNote {
            user_id,
            linked_project_id: self.linked_project_id,
            title: self.title,
            content: self.content,
            favorited: self.favorited,
            tags: self.tags,
        }
    }
}

/// Partial note update. `tags: []` is a supplied value and clears the tags.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NoteChanges {
    #[serde(rename = "linkedProjectID")]
    pub linked_project_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub favorited: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        supplied_id(self.linked_project_id).is_none()
            && supplied(&self.title).is_none()
            && supplied(&self.content).is_none()
            && self.favorited.is_none()
            && self.tags.is_none()
    }

    pub fn apply_to(&self, note: &mut Note) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(id) = supplied_id(self.linked_project_id) {
            note.linked_project_id = id;
        }
        if let Some(v) = supplied(&self.title) {
            note.title = v.to_string();
        }
        if let Some(v) = supplied(&self.content) {
            note.content = v.to_string();
        }
        if let Some(v) = self.favorited {
            note.favorited = v;
        }
        if let Some(tags) = &self.tags {
            note.tags = tags.clone();
        }
        note.last_edited = Utc::now();
        true
    }
}
