//! Deleted-log access for web handlers.

use todo_models::{db::connection::DbConnection, deleted::DeletedDoc};
use todo_sdk::{deleted::DeletedApi, todo::TodoApi, user::UserApi};

use crate::{parse_object_id, prelude::*};

impl From<DeletedDoc> for W<DeletedApi> {
    fn from(value: DeletedDoc) -> Self {
        Self(DeletedApi {
            id: value.id.to_hex(),
            user: W::<UserApi>::from(value.user).0,
            todos: value
                .todos
                .into_iter()
                .map(|t| W::<TodoApi>::from(t).0)
                .collect(),
            deleted_at: value.deleted_at.to_chrono(),
        })
    }
}

pub async fn get_all_deleted(connection: &DbConnection) -> Result<Vec<DeletedApi>> {
    let records = connection.bounded(connection.deleted.fetch_all()).await?;
    Ok(records
        .into_iter()
        .map(|r| W::<DeletedApi>::from(r).0)
        .collect())
}

pub async fn get_deleted(connection: &DbConnection, del_id: &str) -> Result<DeletedApi> {
    let id = parse_object_id(del_id)?;
    let record = connection
        .bounded(connection.deleted.fetch_by_id(&id))
        .await?
        .ok_or(Error::DeletedNotFound)?;
    Ok(W::<DeletedApi>::from(record).0)
}
