use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{not_nil, supplied, supplied_id};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    #[serde(rename = "linkedProjectID")]
    pub linked_project_id: Uuid,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub linked_project_id: Uuid,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTaskPayload {
    #[serde(rename = "linkedProjectID")]
    #[validate(custom(function = "not_nil"))]
    pub linked_project_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    pub completed: bool,
}

impl From<CreateTaskPayload> for NewTask {
    fn from(payload: CreateTaskPayload) -> Self {
        Self {
            linked_project_id: payload.linked_project_id,
            description: payload.description,
            completed: payload.completed,
        }
    }
}

/// Partial task update. A nil project id or empty description means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaskChanges {
    #[serde(rename = "linkedProjectID")]
    pub linked_project_id: Option<Uuid>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        supplied_id(self.linked_project_id).is_none()
            && supplied(&self.description).is_none()
            && self.completed.is_none()
    }

    pub fn apply_to(&self, task: &mut Task) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(id) = supplied_id(self.linked_project_id) {
            task.linked_project_id = id;
        }
        if let Some(v) = supplied(&self.description) {
            task.description = v.to_string();
        }
        if let Some(v) = self.completed {
            task.completed = v;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_project_and_description() {
        let payload: CreateTaskPayload = serde_json::from_value(json!({})).unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);

        let payload: CreateTaskPayload = serde_json::from_value(json!({
            "linkedProjectID": Uuid::new_v4(),
            "description": "write tests"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(!payload.completed);
    }

    #[test]
    fn partial_update_keeps_absent_fields() {
        let project = Uuid::new_v4();
        let mut task = Task {
            id: Uuid::new_v4(),
            linked_project_id: project,
            description: "old".into(),
            completed: true,
        };

        let changes: TaskChanges = serde_json::from_value(json!({ "description": "new" })).unwrap();
        assert!(changes.apply_to(&mut task));
        assert_eq!(task.description, "new");
        assert_eq!(task.linked_project_id, project);
        assert!(task.completed);

        let nothing: TaskChanges =
            serde_json::from_value(json!({ "description": "", "linkedProjectID": Uuid::nil() })).unwrap();
        assert!(nothing.is_empty());
        assert!(!nothing.apply_to(&mut task));
    }
}
