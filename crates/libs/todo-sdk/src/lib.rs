//! Wire types for the todo service.
//!
//! Everything a client sends or receives over HTTP is defined here so the
//! server and the integration tests agree on one shape.

use serde::{Deserialize, Serialize};

pub mod deleted;
pub mod error;
pub mod page;
pub mod prelude;
pub mod role;
pub mod todo;
pub mod user;

/// Envelope used by every successful read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement for mutations that return no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejects empty or whitespace-only required fields.
pub(crate) fn require(field: &'static str, value: &str) -> prelude::Result<()> {
    if value.trim().is_empty() {
        return Err(error::Error::MissingField(field));
    }
    Ok(())
}
