//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] todo_models::error::Error),

    #[error(transparent)]
    Auth(#[from] todo_auth::error::Error),

    #[error(transparent)]
    Validation(#[from] todo_sdk::error::Error),

    #[error("Malformed request body: {0}")]
    Body(String),

    #[error("Malformed query string: {0}")]
    Query(String),

    #[error("Invalid object id '{0}'")]
    InvalidObjectId(String),

    /* Api Errors */
    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Refresh token no longer current")]
    StaleRefreshToken,

    #[error("Context Missing")]
    CtxMissing,

    #[error("User not found")]
    UserNotFound,

    #[error("Todo not found")]
    TodoNotFound,

    #[error("Deleted record not found")]
    DeletedNotFound,

    #[error("Email or phone number already exists")]
    UserExists,

    #[error("Todo title already exists")]
    TodoExists,

    #[error("Todo and user_id do not match")]
    OwnerMismatch,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match &self {
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Body(_) => (StatusCode::BAD_REQUEST, "Invalid request body".into()),
            Error::Query(_) => (StatusCode::BAD_REQUEST, "Invalid query string".into()),
            Error::InvalidObjectId(_) => (StatusCode::BAD_REQUEST, "Invalid ID format".into()),
            Error::WrongCredentials => {
                (StatusCode::UNAUTHORIZED, "Email or password is incorrect".into())
            }
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Missing credentials".into()),
            Error::StaleRefreshToken => {
                (StatusCode::UNAUTHORIZED, "Invalid authentication token".into())
            }
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden".into()),
            Error::UserNotFound | Error::TodoNotFound | Error::DeletedNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::UserExists | Error::TodoExists | Error::OwnerMismatch => {
                (StatusCode::CONFLICT, self.to_string())
            }
            Error::Models(todo_models::error::Error::DuplicateKey) => {
                (StatusCode::CONFLICT, "Resource already exists".into())
            }
            Error::Auth(err) if !err.is_client_fault() => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
            Error::Auth(err) => match err {
                todo_auth::error::Error::TokenMissing => {
                    (StatusCode::UNAUTHORIZED, "Authentication required".into())
                }
                todo_auth::error::Error::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "Authentication token expired".into())
                }
                _ => (StatusCode::UNAUTHORIZED, "Invalid authentication token".into()),
            },
            Error::AuthTokenCreation | Error::Models(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: Error) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status(todo_sdk::error::Error::MissingField("email").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(Error::WrongCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(todo_auth::error::Error::TokenExpired.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(todo_auth::error::Error::HashWorker.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(Error::Query("dup".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(Error::ApiForbidden), StatusCode::FORBIDDEN);
        assert_eq!(status(Error::TodoNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(Error::OwnerMismatch), StatusCode::CONFLICT);
        assert_eq!(
            status(todo_models::error::Error::DuplicateKey.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(todo_models::error::Error::Timeout.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
