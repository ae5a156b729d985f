//! Core types for todos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{Error, Result};

/// Todo ID type
pub type TodoId = Uuid;

/// Progress of a todo item
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Todo,
    Done,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Todo => "todo",
            TodoStatus::Done => "done",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(TodoStatus::Todo),
            "done" => Ok(TodoStatus::Done),
            other => Err(Error::validation(format!(
                "status: `{}` is not a valid enum value, expected one of: todo, done",
                other
            ))),
        }
    }
}

/// A stored todo item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TodoStatus,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a new record, assigning its id and creation time
    pub fn new(input: NewTodo) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            created_at: Utc::now(),
        }
    }

    /// Merge a patch into this record. `id` and `created_at` never change.
    pub fn apply(&mut self, patch: &TodoPatch) {
        self.title = patch.title.clone();
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Validated input for inserting a todo
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TodoStatus::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = status;
        self
    }
}

/// Validated input for updating a todo
#[derive(Debug, Clone, PartialEq)]
pub struct TodoPatch {
    pub title: String,
    /// `None` keeps the description, `Some(None)` clears it
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }
}

/// Request body for `POST /todos`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "todo")]
    pub status: Option<String>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<NewTodo> {
        let title = required_title(self.title)?;
        let status = parse_status(self.status.as_deref())?.unwrap_or_default();

        Ok(NewTodo {
            title,
            description: self.description,
            status,
        })
    }
}

/// Request body for `PUT /todos/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    /// An explicit `null` clears the stored description
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(example = "done")]
    pub status: Option<String>,
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<TodoPatch> {
        let title = required_title(self.title)?;
        let status = parse_status(self.status.as_deref())?;

        Ok(TodoPatch {
            title,
            description: self.description,
            status,
        })
    }
}

fn required_title(title: Option<String>) -> Result<String> {
    match title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(Error::MissingTitle),
    }
}

/// Distinguishes a field sent as `null` (`Some(None)`) from an absent one (`None`)
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_status(status: Option<&str>) -> Result<Option<TodoStatus>> {
    status.map(str::parse).transpose()
}

/// Plain `{"message": ...}` body used for errors and acknowledgements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_status() {
        let request = CreateTodoRequest {
            title: Some("buy milk".to_string()),
            ..Default::default()
        };

        let new_todo = request.validate().unwrap();
        assert_eq!(new_todo.title, "buy milk");
        assert_eq!(new_todo.description, None);
        assert_eq!(new_todo.status, TodoStatus::Todo);
    }

    #[test]
    fn test_create_request_requires_title() {
        let missing = CreateTodoRequest::default().validate();
        assert!(matches!(missing, Err(Error::MissingTitle)));

        let empty = CreateTodoRequest {
            title: Some(String::new()),
            description: Some("no title".to_string()),
            status: None,
        }
        .validate();
        assert!(matches!(empty, Err(Error::MissingTitle)));
    }

    #[test]
    fn test_invalid_status_rejected() {
        let request = CreateTodoRequest {
            title: Some("write report".to_string()),
            description: None,
            status: Some("archived".to_string()),
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));

        let request = UpdateTodoRequest {
            title: Some("write report".to_string()),
            description: None,
            status: Some("DONE".to_string()),
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let mut todo = Todo::new(NewTodo::new("draft").with_description("first pass"));
        let id = todo.id;
        let created_at = todo.created_at;

        todo.apply(&TodoPatch {
            title: "final".to_string(),
            description: None,
            status: Some(TodoStatus::Done),
        });

        assert_eq!(todo.id, id);
        assert_eq!(todo.created_at, created_at);
        assert_eq!(todo.title, "final");
        assert_eq!(todo.description.as_deref(), Some("first pass"));
        assert_eq!(todo.status, TodoStatus::Done);
    }

    #[test]
    fn test_todo_wire_format() {
        let todo = Todo::new(NewTodo::new("wire"));
        let value = serde_json::to_value(&todo).unwrap();

        assert_eq!(value["_id"], todo.id.to_string());
        assert_eq!(value["title"], "wire");
        assert_eq!(value["status"], "todo");
        assert!(value["description"].is_null());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_update_request_null_description_clears() {
        let patch: UpdateTodoRequest =
            serde_json::from_str(r#"{"title": "t", "description": null}"#).unwrap();
        let patch = patch.validate().unwrap();
        assert_eq!(patch.description, Some(None));

        let absent: UpdateTodoRequest = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(absent.validate().unwrap().description, None);

        let mut todo = Todo::new(NewTodo::new("t").with_description("old"));
        todo.apply(&patch);
        assert_eq!(todo.description, None);
    }
}
