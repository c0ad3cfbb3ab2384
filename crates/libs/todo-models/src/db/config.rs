//! Database configuration management.

use std::fmt::Display;
use std::time::Duration;

/// Document store configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// MongoDB connection string. `None` selects the in-memory store.
    pub mongodb_uri: Option<String>,
    /// MongoDB database name.
    pub database: String,
    /// Deadline applied to every store operation.
    pub query_timeout: Duration,
}

impl DbConfig {
    /// In-memory store configuration.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use todo_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::in_memory(Duration::from_secs(100));
    /// assert!(config.mongodb_uri.is_none());
    /// ```
    pub fn in_memory(query_timeout: Duration) -> Self {
        Self {
            mongodb_uri: None,
            database: String::from("todo"),
            query_timeout,
        }
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mongodb_uri {
            Some(_) => write!(f, "mongodb REDACTED/{}", self.database),
            None => write!(f, "in-memory"),
        }
    }
}
