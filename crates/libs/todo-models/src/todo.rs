//! Todo documents.

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const TODO_COLLECTION: &str = "todos";

/// A todo as stored in the `todos` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    /// `user_id` of the owner.
    pub user_id: String,
    pub check: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Access to the `todos` collection.
///
/// `(user_id, title)` is unique; a write that would duplicate it fails with
/// [`Error::DuplicateKey`].
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert(&self, todo: &TodoDoc) -> Result<()>;

    async fn exists_with_title(&self, user_id: &str, title: &str) -> Result<bool>;

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>>;

    async fn fetch_all(&self) -> Result<Vec<TodoDoc>>;

    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<TodoDoc>>;

    async fn count_by_user(&self, user_id: &str) -> Result<u64>;

    async fn fetch_checked(&self) -> Result<Vec<TodoDoc>>;

    async fn count(&self) -> Result<u64>;

    async fn count_unchecked(&self) -> Result<u64>;

    /// Returns whether a todo matched.
    async fn set_check(&self, id: &ObjectId, check: bool, updated_at: DateTime) -> Result<bool>;

    /// Returns whether a todo matched.
    async fn edit(
        &self,
        id: &ObjectId,
        title: &str,
        description: &str,
        updated_at: DateTime,
    ) -> Result<bool>;

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>>;

    /// Removes the todos with the given ids that still belong to `user_id`.
    /// Returns the number removed.
    async fn delete_owned(&self, user_id: &str, ids: &[ObjectId]) -> Result<u64>;
}
