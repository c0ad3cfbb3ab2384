//! Documents and document-store access for the todo service.
//!
//! Each collection is reached through a store trait ([`user::UserStore`],
//! [`todo::TodoStore`], [`deleted::DeletedStore`]) with a MongoDB and an
//! in-memory implementation. [`db::connection::DbConnection`] bundles the
//! three stores with the per-operation deadline and is what the web layer
//! receives.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//! use todo_models::db::connection::DbConnection;
//!
//! # async fn example() -> todo_models::prelude::Result<()> {
//! let conn = DbConnection::in_memory(Duration::from_secs(5));
//! let users = conn.bounded(conn.users.count()).await?;
//! assert_eq!(users, 0);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod deleted;
pub mod error;
pub mod prelude;
pub mod todo;
pub mod user;
