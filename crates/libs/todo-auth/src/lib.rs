//! Authentication primitives for the todo service.
//!
//! Password hashing lives in [`secret_hash`], token signing in [`jwt`]. Neither
//! module touches the document store; the web layer composes them into the
//! token service and the login flow.

pub mod auth_body;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
pub const ISS: &str = "TODO";
