use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::supplied;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub deadline: String,
    pub date_created: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub deadline: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProjectPayload {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "is required"))]
    pub priority: String,
    #[validate(length(min = 1, message = "is required"))]
    pub deadline: String,
}

impl CreateProjectPayload {
    pub fn into_new(self, user_id: Uuid) -> NewProject {
        NewProject {
            user_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            deadline: self.deadline,
        }
    }
}

/// Partial project update. Empty strings mean "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.description, &self.priority, &self.deadline]
            .into_iter()
            .all(|field| supplied(field).is_none())
    }

    /// Copy supplied fields onto `project`. Returns false when nothing was supplied.
    pub fn apply_to(&self, project: &mut Project) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(v) = supplied(&self.title) {
            project.title = v.to_string();
        }
        if let Some(v) = supplied(&self.description) {
            project.description = v.to_string();
        }
        if let Some(v) = supplied(&self.priority) {
            project.priority = v.to_string();
        }
        if let Some(v) = supplied(&self.deadline) {
            project.deadline = v.to_string();
        }
        project.last_edited = Utc::now();
        true
    }
}
