//! JSON body extractor.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::error::Error;

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// A body that is not valid JSON, misses a field or has the wrong content
/// type is rejected with [`Error::Body`] and rendered through the regular
/// error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Body(rejection.body_text())
    }
}
