//! Todo service (todod)
//!
//! HTTP front of the todo backend. The router in [`api`] maps every route
//! onto the handler logic of `todo-web`; [`config`] turns flags and
//! environment variables into the store and token settings; [`state`] is
//! what every handler receives.

pub mod api;
pub mod config;
pub mod error;
pub mod prelude;
pub mod state;
