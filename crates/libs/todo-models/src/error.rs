//! Database error types.

/// Document store errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// MongoDB driver error.
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// A unique index rejected the write.
    #[error("Duplicate key")]
    DuplicateKey,

    /// The operation did not finish before the request deadline.
    #[error("Store operation timed out")]
    Timeout,
}
