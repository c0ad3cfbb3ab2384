//! Request context management for web handlers.
//!
//! The context is built from a validated access token by
//! [`resolver::mw_ctx_resolver`] and extracted by handlers that need to
//! know who is calling.

use todo_sdk::role::UserRole;

use crate::auth_token::AuthToken;

pub mod resolver;

/// Identity of the caller of an authenticated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_sdk::role::UserRole;
    /// use todo_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new("65f1c0ffee", "a@x.com", UserRole::User);
    /// assert_eq!(ctx.user_id, "65f1c0ffee");
    /// assert_eq!(ctx.role, UserRole::User);
    /// ```
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            role,
        }
    }
}

impl From<AuthToken> for Ctx {
    fn from(token: AuthToken) -> Self {
        Self {
            user_id: token.user_id,
            email: token.email,
            first_name: token.first_name,
            last_name: token.last_name,
            role: token.user_role,
        }
    }
}
