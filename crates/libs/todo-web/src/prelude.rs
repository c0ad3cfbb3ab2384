//! Common types and utilities.

/// Web error type.
pub use crate::error::Error;

/// Web result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Generic wrapper for newtype pattern.
pub struct W<T>(pub T);
