//! Route guards built on the context left behind by
//! [`mw_ctx_resolver`](crate::ctx::resolver::mw_ctx_resolver).
//!
//! Both guards must sit inside the resolver layer. Without it every request
//! looks anonymous and is turned away with [`Error::CtxMissing`].

use crate::prelude::*;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use todo_sdk::role::UserRole;

use super::{ctx::Ctx, policy::require_role};

/// Lets the request through only when a valid access token was presented.
///
/// The rejection is whatever the resolver recorded, so an expired token and a
/// missing one produce different messages.
///
/// ```rust,no_run
/// use axum::{Router, middleware::from_fn, routing::get};
/// use todo_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/todos", get(|| async { "[]" }))
///     .route_layer(from_fn(mw_require_auth));
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    let ctx = ctx?;
    tracing::trace!("Authenticated {} ({:?})", ctx.user_id, ctx.role);
    Ok(next.run(req).await)
}

/// Like [`mw_require_auth`] but additionally demands `role`.
///
/// Usually installed through [`require_role!`](crate::require_role).
pub async fn mw_require_role(
    State(role): State<UserRole>,
    ctx: Ctx,
    req: Request,
    next: Next,
) -> Result<Response> {
    require_role(&ctx, role)?;
    Ok(next.run(req).await)
}

/// Builds a layer that only admits callers holding the given [`UserRole`].
///
/// ```rust
/// use axum::{Router, routing::get};
/// use todo_sdk::role::UserRole;
/// use todo_web::require_role;
///
/// let admin: Router<()> = Router::new()
///     .route("/users", get(|| async { "all users" }))
///     .route_layer(require_role!(UserRole::Admin));
/// ```
#[macro_export]
macro_rules! require_role {
    ($role:expr) => {
        axum::middleware::from_fn_with_state($role, $crate::mw_auth::mw_require_role)
    };
}
