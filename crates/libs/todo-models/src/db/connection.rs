//! Store bundle handed to request handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::config::DbConfig;
use super::memory::MemoryStore;
use super::mongo::MongoClient;
use crate::deleted::{DELETED_COLLECTION, DeletedDoc, DeletedStore};
use crate::prelude::*;
use crate::todo::{TODO_COLLECTION, TodoDoc, TodoStore};
use crate::user::{USER_COLLECTION, UserDoc, UserStore};

/// The three collections plus the deadline every operation runs under.
///
/// Cloning is cheap; all clones share the same backends.
#[derive(Clone)]
pub struct DbConnection {
    pub users: Arc<dyn UserStore>,
    pub todos: Arc<dyn TodoStore>,
    pub deleted: Arc<dyn DeletedStore>,
    query_timeout: Duration,
}

impl DbConnection {
    /// Connects to the backend selected by `config`.
    ///
    /// For MongoDB this pings the server and creates the unique indexes.
    pub async fn new(config: &DbConfig) -> Result<Self> {
        let Some(uri) = &config.mongodb_uri else {
            info!("Using in-memory document store");
            return Ok(Self::in_memory(config.query_timeout));
        };

        let client = MongoClient::new(uri, &config.database).await?;
        Ok(Self {
            users: Arc::new(client.collection::<UserDoc>(USER_COLLECTION).await?),
            todos: Arc::new(client.collection::<TodoDoc>(TODO_COLLECTION).await?),
            deleted: Arc::new(client.collection::<DeletedDoc>(DELETED_COLLECTION).await?),
            query_timeout: config.query_timeout,
        })
    }

    /// A fresh, empty in-memory store.
    pub fn in_memory(query_timeout: Duration) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            todos: store.clone(),
            deleted: store,
            query_timeout,
        }
    }

    /// Runs a store operation under the request deadline.
    ///
    /// An operation that does not finish in time is dropped and reported as
    /// [`Error::Timeout`]; it is never retried.
    pub async fn bounded<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.query_timeout, operation)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_result() {
        let conn = DbConnection::in_memory(Duration::from_secs(1));
        assert_eq!(conn.bounded(conn.users.count()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let conn = DbConnection::in_memory(Duration::from_millis(10));
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        };
        assert!(matches!(conn.bounded(slow).await, Err(Error::Timeout)));
    }
}
