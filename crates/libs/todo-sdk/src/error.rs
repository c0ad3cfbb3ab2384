//! Request validation errors.

/// Reasons a decoded request body is rejected before reaching the store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required field is empty.
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    /// A field is present but malformed.
    #[error("Invalid field '{0}'")]
    InvalidField(&'static str),
}
