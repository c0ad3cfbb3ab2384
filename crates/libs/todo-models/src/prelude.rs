pub use crate::error::Error;

/// Result of a store operation.
pub type Result<T> = core::result::Result<T, Error>;
