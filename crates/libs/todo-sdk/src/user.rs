use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, require, role::UserRole};

/// Body of `POST /users/signup`.
///
/// Server assigned fields (ids, timestamps, tokens) are not part of the
/// request and are ignored if a client sends them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_type: UserRole,
}

impl UserSignup {
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("phone", &self.phone)?;
        if !is_email(&self.email) {
            return Err(Error::InvalidField("email"));
        }
        Ok(())
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Response of a successful signup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserCreated {
    pub user_id: String,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

impl UserLoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /users/refresh`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenRefreshRequest {
    pub refresh_token: String,
}

/// A user as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserApi {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserRole,
    /// Only present on login responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Only present on login responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the user listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserPage {
    pub total_count: u64,
    pub user_items: Vec<UserApi>,
}
