use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, require};

/// Body of `POST /todos`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoPost {
    pub title: String,
    pub description: String,
    /// Owner of the new todo.
    pub user_id: String,
}

impl TodoPost {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            user_id: user_id.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("user_id", &self.user_id)
    }
}

/// Body of `PUT /todos/{todo_id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoCheckUpdate {
    pub check: bool,
    /// Must match the stored owner of the todo.
    pub user_id: String,
}

impl TodoCheckUpdate {
    pub fn validate(&self) -> Result<()> {
        require("user_id", &self.user_id)
    }
}

/// Body of `PUT /todos-update/{todo_id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoEdit {
    pub title: String,
    pub description: String,
    /// Must match the stored owner of the todo.
    pub user_id: String,
}

impl TodoEdit {
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("user_id", &self.user_id)
    }
}

/// A todo as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TodoApi {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub check: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response of a successful `POST /todos`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodoCreated {
    pub id: String,
}

/// Todos of one owner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TodosByUser {
    pub data: Vec<TodoApi>,
    pub total_count: u64,
}

/// Checked todos alongside the size of the whole collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActiveTodos {
    pub details: Vec<TodoApi>,
    pub total_count: u64,
}

/// Number of todos still unchecked.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct UncheckedCount {
    pub check: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_validation() {
        assert_eq!(TodoPost::new("t", "d", "u").validate(), Ok(()));
        assert_eq!(
            TodoPost::new("", "d", "u").validate(),
            Err(Error::MissingField("title"))
        );
        assert_eq!(
            TodoPost::new("t", "d", " ").validate(),
            Err(Error::MissingField("user_id"))
        );
    }

    #[test]
    fn test_check_update_requires_check() {
        assert!(serde_json::from_str::<TodoCheckUpdate>(r#"{"user_id":"u"}"#).is_err());
    }
}
