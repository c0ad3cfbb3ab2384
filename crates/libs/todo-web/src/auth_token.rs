//! Authentication token management for web requests.

use bson::DateTime;
use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use todo_auth::{
    ISS,
    auth_body::AuthBody,
    jwt::{JwtKeys, jwt_decode, jwt_encode},
    prelude::Result as AuthResult,
};
use todo_models::{db::connection::DbConnection, user::UserDoc};
use todo_sdk::role::UserRole;
use tracing::{error, warn};
use uuid::Uuid;

use crate::prelude::*;

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims carrying the identity of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_role: UserRole,
    pub user_id: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at time.
    pub iat: i64,
    /// Not before time.
    pub nbf: i64,
    /// JWT ID.
    pub jti: Uuid,
    pub kind: TokenKind,
}

impl AuthToken {
    /// Claims for `user` expiring `ttl` from now.
    pub fn new(user: &UserDoc, kind: TokenKind, ttl: TimeDelta) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            user_role: user.user_type,
            user_id: user.user_id.clone(),
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4(),
            kind,
        })
    }
}

/// Issues and validates session token pairs.
///
/// Access and refresh tokens are signed with separate secrets, so neither
/// can stand in for the other even if the `kind` claim were forged.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: JwtKeys,
    refresh: JwtKeys,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl TokenService {
    /// # Examples
    ///
    /// ```rust
    /// use chrono::TimeDelta;
    /// use todo_web::auth_token::TokenService;
    ///
    /// let tokens = TokenService::new(
    ///     b"access-secret",
    ///     b"refresh-secret",
    ///     TimeDelta::hours(24),
    ///     TimeDelta::hours(168),
    /// );
    /// assert!(tokens.validate_access_token("garbage").is_err());
    /// ```
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl: TimeDelta,
        refresh_ttl: TimeDelta,
    ) -> Self {
        Self {
            access: JwtKeys::new(access_secret),
            refresh: JwtKeys::new(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Signs a fresh access/refresh pair for `user`.
    pub fn issue_tokens(&self, user: &UserDoc) -> Result<AuthBody> {
        let access = AuthToken::new(user, TokenKind::Access, self.access_ttl)?;
        let refresh = AuthToken::new(user, TokenKind::Refresh, self.refresh_ttl)?;

        let encode = |claims: &AuthToken, keys: &JwtKeys| {
            jwt_encode(claims, keys).map_err(|err| {
                error!("Failed to encode JWT {err}");
                err
            })
        };
        Ok(AuthBody::new(
            encode(&access, &self.access)?,
            encode(&refresh, &self.refresh)?,
        ))
    }

    pub fn validate_access_token(&self, token: &str) -> AuthResult<AuthToken> {
        Self::validate(token, &self.access, TokenKind::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> AuthResult<AuthToken> {
        Self::validate(token, &self.refresh, TokenKind::Refresh)
    }

    fn validate(token: &str, keys: &JwtKeys, kind: TokenKind) -> AuthResult<AuthToken> {
        let claims = jwt_decode::<AuthToken>(token, keys)?.claims;
        if claims.kind != kind {
            warn!("Rejected {:?} token presented as {kind:?}", claims.kind);
            return Err(todo_auth::error::Error::InvalidToken);
        }
        Ok(claims)
    }
}

/// Stores a newly issued pair on the user keyed by `user_id`.
///
/// Overwrites whatever pair was stored before; concurrent logins race and
/// the last write wins.
pub async fn refresh_user_tokens(
    connection: &DbConnection,
    tokens: &AuthBody,
    user_id: &str,
) -> Result<()> {
    let matched = connection
        .bounded(connection.users.update_tokens(
            user_id,
            &tokens.access_token,
            &tokens.refresh_token,
            DateTime::now(),
        ))
        .await?;
    if !matched {
        return Err(Error::UserNotFound);
    }
    Ok(())
}

/// Exchanges a refresh token for a new pair.
///
/// Only the refresh token currently stored on the user is accepted; once a
/// pair has been rotated the previous refresh token is dead.
pub async fn refresh_session(
    connection: &DbConnection,
    service: &TokenService,
    refresh_token: &str,
) -> Result<AuthBody> {
    let claims = service.validate_refresh_token(refresh_token)?;
    let user = connection
        .bounded(connection.users.fetch_by_user_id(&claims.user_id))
        .await?
        .ok_or(Error::StaleRefreshToken)?;

    if user.refresh_token != refresh_token {
        warn!("Stale refresh token for user {}", user.user_id);
        return Err(Error::StaleRefreshToken);
    }

    let tokens = service.issue_tokens(&user)?;
    refresh_user_tokens(connection, &tokens, &user.user_id).await?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bson::oid::ObjectId;
    use todo_models::user::UserDoc;

    use super::*;

    fn service() -> TokenService {
        TokenService::new(
            b"access",
            b"refresh",
            TimeDelta::hours(1),
            TimeDelta::hours(2),
        )
    }

    fn user() -> UserDoc {
        let id = ObjectId::new();
        UserDoc {
            id,
            user_id: id.to_hex(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "a@x.com".into(),
            phone: "111".into(),
            password: String::new(),
            user_type: UserRole::Admin,
            token: String::new(),
            refresh_token: String::new(),
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let user = user();
        let tokens = service().issue_tokens(&user).unwrap();
        assert_ne!(tokens.access_token, tokens.refresh_token);

        let claims = service().validate_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.user_id, user.user_id);
        assert_eq!(claims.user_role, UserRole::Admin);
        assert_eq!(claims.iss, ISS);

        let claims = service().validate_refresh_token(&tokens.refresh_token).unwrap();
        assert_eq!(claims.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let tokens = service().issue_tokens(&user()).unwrap();
        assert!(matches!(
            service().validate_access_token(&tokens.refresh_token),
            Err(todo_auth::error::Error::InvalidToken)
        ));
        assert!(matches!(
            service().validate_refresh_token(&tokens.access_token),
            Err(todo_auth::error::Error::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let expired = TokenService::new(
            b"access",
            b"refresh",
            TimeDelta::seconds(-10),
            TimeDelta::seconds(-10),
        );
        let tokens = expired.issue_tokens(&user()).unwrap();
        assert!(matches!(
            expired.validate_access_token(&tokens.access_token),
            Err(todo_auth::error::Error::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_refresh_session_rotates() {
        let conn = DbConnection::in_memory(Duration::from_secs(5));
        let service = service();
        let mut user = user();
        let first = service.issue_tokens(&user).unwrap();
        user.token = first.access_token.clone();
        user.refresh_token = first.refresh_token.clone();
        conn.users.insert(&user).await.unwrap();

        let second = refresh_session(&conn, &service, &first.refresh_token)
            .await
            .unwrap();
        let stored = conn
            .users
            .fetch_by_user_id(&user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.refresh_token, second.refresh_token);

        assert!(matches!(
            refresh_session(&conn, &service, &first.refresh_token).await,
            Err(Error::StaleRefreshToken)
        ));
    }
}
