//! Web layer of the todo service.
//!
//! Holds everything between the router and the document store: the token
//! service, the access policy, the authentication middleware, the request
//! context and the logic behind every route. Handlers in the service binary
//! stay thin and call into the modules below.

use bson::oid::ObjectId;

use crate::prelude::*;

pub mod auth_token;
pub mod ctx;
pub mod deleted;
pub mod error;
pub mod json;
pub mod mw_auth;
pub mod policy;
pub mod prelude;
pub mod query;
pub mod todo;
pub mod user;

/// Parses the hex form of an ObjectId taken from a path segment.
///
/// ```rust
/// use todo_web::parse_object_id;
///
/// assert!(parse_object_id("65f1c0ffee0000000000beef").is_ok());
/// assert!(parse_object_id("not-an-id").is_err());
/// ```
pub fn parse_object_id(value: &str) -> Result<ObjectId> {
    ObjectId::parse_str(value).map_err(|_| Error::InvalidObjectId(value.to_string()))
}
