use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{todo::TodoApi, user::UserApi};

/// An entry of the soft-delete log: a removed user and the todos removed
/// with it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeletedApi {
    pub id: String,
    pub user: UserApi,
    pub todos: Vec<TodoApi>,
    pub deleted_at: DateTime<Utc>,
}
