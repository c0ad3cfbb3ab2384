//! Soft-delete log.

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, todo::TodoDoc, user::UserDoc};

pub const DELETED_COLLECTION: &str = "deleted";

/// A removed user together with the todos it owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Stored without credentials.
    pub user: UserDoc,
    pub todos: Vec<TodoDoc>,
    pub deleted_at: DateTime,
}

impl DeletedDoc {
    pub fn new(user: UserDoc, todos: Vec<TodoDoc>) -> Self {
        Self {
            id: ObjectId::new(),
            user: user.without_credentials(),
            todos,
            deleted_at: DateTime::now(),
        }
    }
}

/// Access to the `deleted` collection.
#[async_trait]
pub trait DeletedStore: Send + Sync {
    async fn insert(&self, deleted: &DeletedDoc) -> Result<()>;

    async fn fetch_all(&self) -> Result<Vec<DeletedDoc>>;

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<DeletedDoc>>;
}
