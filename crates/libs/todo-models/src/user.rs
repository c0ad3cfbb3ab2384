//! User documents.

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use todo_sdk::role::UserRole;

use crate::prelude::*;

pub const USER_COLLECTION: &str = "users";

/// A user as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Hex form of `id`, assigned once at creation.
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Argon2 PHC hash.
    pub password: String,
    pub user_type: UserRole,
    pub token: String,
    pub refresh_token: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl UserDoc {
    /// Drops the password hash and the token pair.
    pub fn without_credentials(self) -> Self {
        Self {
            password: String::new(),
            token: String::new(),
            refresh_token: String::new(),
            ..self
        }
    }
}

/// Access to the `users` collection.
///
/// `email`, `phone` and `user_id` are unique; inserting a duplicate fails
/// with [`Error::DuplicateKey`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &UserDoc) -> Result<()>;

    /// Preliminary uniqueness check. The unique constraint enforced by
    /// [`UserStore::insert`] remains authoritative.
    async fn exists_with_email_or_phone(&self, email: &str, phone: &str) -> Result<bool>;

    async fn fetch_by_email(&self, email: &str) -> Result<Option<UserDoc>>;

    async fn fetch_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>>;

    /// Overwrites the stored token pair. Returns whether a user matched.
    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime,
    ) -> Result<bool>;

    async fn count(&self) -> Result<u64>;

    /// Users in creation order.
    async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<UserDoc>>;

    async fn delete_by_user_id(&self, user_id: &str) -> Result<Option<UserDoc>>;
}
