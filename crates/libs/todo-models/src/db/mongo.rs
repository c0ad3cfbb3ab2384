//! MongoDB backend.

use async_trait::async_trait;
use bson::{DateTime, Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{error, info};

use crate::deleted::{DeletedDoc, DeletedStore};
use crate::prelude::*;
use crate::todo::{TodoDoc, TodoStore};
use crate::user::{UserDoc, UserStore};

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Schemas that declare their own indexes.
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

fn unique(name: &str) -> Option<IndexOptions> {
    Some(
        IndexOptions::builder()
            .unique(true)
            .name(name.to_string())
            .build(),
    )
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (doc! { "email": 1 }, unique("email_unique")),
            (doc! { "phone": 1 }, unique("phone_unique")),
            (doc! { "user_id": 1 }, unique("user_id_unique")),
        ]
    }
}

impl IntoIndexes for TodoDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "user_id": 1, "title": 1 },
            unique("owner_title_unique"),
        )]
    }
}

impl IntoIndexes for DeletedDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

/// Maps unique index violations to [`Error::DuplicateKey`].
fn write_error(err: mongodb::error::Error) -> Error {
    if let ErrorKind::Write(WriteFailure::WriteError(write)) = err.kind.as_ref() {
        if write.code == DUPLICATE_KEY_CODE {
            return Error::DuplicateKey;
        }
    }
    error!("MongoDB write failed: {err}");
    Error::Mongo(err)
}

/// MongoDB client bound to one database.
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connects and pings the server.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB");
        let client = Client::with_uri_str(uri).await?;
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        info!("Connected to MongoDB database '{db_name}'");

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Opens a typed collection and applies its indexes.
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        let collection = MongoCollection {
            inner: self.client.database(&self.db_name).collection::<T>(name),
        };
        collection.apply_indexes().await?;
        Ok(collection)
    }
}

/// Typed collection.
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    async fn apply_indexes(&self) -> Result<()> {
        let indices: Vec<IndexModel> = T::into_indices()
            .into_iter()
            .map(|(keys, options)| IndexModel::builder().keys(keys).options(options).build())
            .collect();
        if indices.is_empty() {
            return Ok(());
        }
        self.inner.create_indexes(indices).await?;
        info!("Indexes ready for '{}'", self.inner.name());
        Ok(())
    }

    async fn insert_doc(&self, item: &T) -> Result<()> {
        self.inner.insert_one(item).await.map_err(write_error)?;
        Ok(())
    }

    async fn find_doc(&self, filter: Document) -> Result<Option<T>> {
        Ok(self.inner.find_one(filter).await?)
    }

    async fn find_docs(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self.inner.find(filter).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_docs(&self, filter: Document) -> Result<u64> {
        Ok(self.inner.count_documents(filter).await?)
    }

    async fn update_doc(&self, filter: Document, update: Document) -> Result<bool> {
        let result = self
            .inner
            .update_one(filter, update)
            .await
            .map_err(write_error)?;
        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl UserStore for MongoCollection<UserDoc> {
    async fn insert(&self, user: &UserDoc) -> Result<()> {
        self.insert_doc(user).await
    }

    async fn exists_with_email_or_phone(&self, email: &str, phone: &str) -> Result<bool> {
        let filter = doc! { "$or": [ { "email": email }, { "phone": phone } ] };
        Ok(self.count_docs(filter).await? > 0)
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<UserDoc>> {
        self.find_doc(doc! { "email": email }).await
    }

    async fn fetch_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>> {
        self.find_doc(doc! { "user_id": user_id }).await
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime,
    ) -> Result<bool> {
        let update = doc! {
            "$set": {
                "token": token,
                "refresh_token": refresh_token,
                "updated_at": updated_at,
            }
        };
        self.update_doc(doc! { "user_id": user_id }, update).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_docs(doc! {}).await
    }

    async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<UserDoc>> {
        let cursor = self
            .inner
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip.min(i64::MAX as u64))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>> {
        Ok(self
            .inner
            .find_one_and_delete(doc! { "user_id": user_id })
            .await?)
    }
}

#[async_trait]
impl TodoStore for MongoCollection<TodoDoc> {
    async fn insert(&self, todo: &TodoDoc) -> Result<()> {
        self.insert_doc(todo).await
    }

    async fn exists_with_title(&self, user_id: &str, title: &str) -> Result<bool> {
        Ok(self.count_docs(doc! { "user_id": user_id, "title": title }).await? > 0)
    }

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>> {
        self.find_doc(doc! { "_id": *id }).await
    }

    async fn fetch_all(&self) -> Result<Vec<TodoDoc>> {
        self.find_docs(doc! {}).await
    }

    async fn fetch_by_user(&self, user_id: &str) -> Result<Vec<TodoDoc>> {
        self.find_docs(doc! { "user_id": user_id }).await
    }

    async fn count_by_user(&self, user_id: &str) -> Result<u64> {
        self.count_docs(doc! { "user_id": user_id }).await
    }

    async fn fetch_checked(&self) -> Result<Vec<TodoDoc>> {
        self.find_docs(doc! { "check": true }).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_docs(doc! {}).await
    }

    async fn count_unchecked(&self) -> Result<u64> {
        self.count_docs(doc! { "check": false }).await
    }

    async fn set_check(&self, id: &ObjectId, check: bool, updated_at: DateTime) -> Result<bool> {
        let update = doc! { "$set": { "check": check, "updated_at": updated_at } };
        self.update_doc(doc! { "_id": *id }, update).await
    }

    async fn edit(
        &self,
        id: &ObjectId,
        title: &str,
        description: &str,
        updated_at: DateTime,
    ) -> Result<bool> {
        let update = doc! {
            "$set": {
                "title": title,
                "description": description,
                "updated_at": updated_at,
            }
        };
        self.update_doc(doc! { "_id": *id }, update).await
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<TodoDoc>> {
        Ok(self.inner.find_one_and_delete(doc! { "_id": *id }).await?)
    }

    async fn delete_owned(&self, user_id: &str, ids: &[ObjectId]) -> Result<u64> {
        let result = self
            .inner
            .delete_many(doc! { "user_id": user_id, "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl DeletedStore for MongoCollection<DeletedDoc> {
    async fn insert(&self, deleted: &DeletedDoc) -> Result<()> {
        self.insert_doc(deleted).await
    }

    async fn fetch_all(&self) -> Result<Vec<DeletedDoc>> {
        self.find_docs(doc! {}).await
    }

    async fn fetch_by_id(&self, id: &ObjectId) -> Result<Option<DeletedDoc>> {
        self.find_doc(doc! { "_id": *id }).await
    }
}
