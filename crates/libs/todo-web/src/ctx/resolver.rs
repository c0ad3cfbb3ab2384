//! Context resolver for extracting the caller from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use todo_auth::prelude::Result as AuthResult;
use tracing::warn;

use crate::{auth_token::TokenService, ctx::Ctx, prelude::*};

/// Middleware for resolving request context from bearer tokens.
///
/// Reads the `Authorization: Bearer <token>` header, validates the access
/// token and stores the outcome in the request extensions. It never rejects
/// a request by itself; routes that need a caller are guarded with
/// [`crate::mw_auth::mw_require_auth`].
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use chrono::TimeDelta;
/// use todo_web::{auth_token::TokenService, ctx::resolver::mw_ctx_resolver};
///
/// let tokens = TokenService::new(b"a", b"r", TimeDelta::hours(1), TimeDelta::hours(2));
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(tokens, mw_ctx_resolver));
/// ```
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(tokens): State<TokenService>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = bearer_token(&headers)
        .and_then(|token| tokens.validate_access_token(&token))
        .map(Ctx::from);

    if let Err(err) = &ctx {
        if !matches!(err, todo_auth::error::Error::TokenMissing) {
            warn!("Rejected access token: {err}");
        }
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> AuthResult<String> {
    if !headers.contains_key(AUTHORIZATION) {
        return Err(todo_auth::error::Error::TokenMissing);
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or(todo_auth::error::Error::InvalidToken)
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<AuthResult<Ctx>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
