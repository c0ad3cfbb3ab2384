//! Query string extractor.

use axum::extract::{FromRequestParts, rejection::QueryRejection};

use crate::error::Error;

/// [`axum::extract::Query`] whose rejection is [`Error::Query`], so a broken
/// query string gets the same error envelope as every other failure.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Query(rejection.body_text())
    }
}
