//! Authentication response structures.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// A freshly issued access/refresh token pair.
///
/// # JSON Format
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthBody {
    /// Short lived token sent with every request.
    pub access_token: String,
    /// Long lived token used to mint a new pair.
    pub refresh_token: String,
    /// The token type (always "Bearer").
    pub token_type: String,
}

impl AuthBody {
    /// Creates a new token pair response.
    ///
    /// ```rust
    /// use todo_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("access".to_string(), "refresh".to_string());
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}
