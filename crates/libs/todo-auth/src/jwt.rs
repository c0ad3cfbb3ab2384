//! JWT signing and verification.
//!
//! Tokens are signed with HS256 using a secret held by the server process.
//! The secret is handed to [`JwtKeys::new`] at startup; nothing in this module
//! reads the environment.
//!
//! # Examples
//!
//! ```rust
//! use todo_auth::jwt::{JwtKeys, jwt_decode, jwt_encode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct UserClaims {
//!     user_id: String,
//!     exp: usize,
//! }
//!
//! let keys = JwtKeys::new(b"MySuperSecret");
//! let claims = UserClaims {
//!     user_id: "65f1c0ffee".to_string(),
//!     exp: 4118335200,
//! };
//!
//! let token = jwt_encode(&claims, &keys).unwrap();
//! let decoded = jwt_decode::<UserClaims>(&token, &keys).unwrap();
//! assert_eq!(claims, decoded.claims);
//! ```

use crate::prelude::*;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// JWT signing algorithm used by the service.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair derived from one signing secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Creates a new key pair from the provided secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtKeys(REDACTED)")
    }
}

/// Creates a signed JWT from the provided claims.
///
/// Claims are signed, not encrypted. Include an `exp` claim: [`jwt_decode`]
/// rejects tokens without one.
pub fn jwt_encode<T>(body: &T, keys: &JwtKeys) -> Result<String>
where
    T: Serialize,
{
    let header = Header::new(ALGORITHM);
    Ok(encode(&header, body, &keys.encoding)?)
}

/// Validates a JWT and extracts its claims.
///
/// Expiry is checked without leeway. An elapsed `exp` yields
/// [`Error::TokenExpired`]; every other failure (bad signature, wrong
/// algorithm, garbage input, claims that do not deserialize) yields
/// [`Error::InvalidToken`].
pub fn jwt_decode<T>(token: &str, keys: &JwtKeys) -> Result<TokenData<T>>
where
    T: DeserializeOwned,
{
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;

    decode(token, &keys.decoding, &validation).map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => {
            warn!("Rejected jwt: {err}");
            Error::InvalidToken
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        exp: u64,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_roundtrip() {
        let keys = JwtKeys::new(b"secret");
        let claims = Claims {
            sub: "user".into(),
            exp: now() + 60,
        };
        let token = jwt_encode(&claims, &keys).unwrap();
        assert_eq!(jwt_decode::<Claims>(&token, &keys).unwrap().claims, claims);
    }

    #[test]
    fn test_expired_token() {
        let keys = JwtKeys::new(b"secret");
        let claims = Claims {
            sub: "user".into(),
            exp: now() - 10,
        };
        let token = jwt_encode(&claims, &keys).unwrap();
        assert!(matches!(
            jwt_decode::<Claims>(&token, &keys),
            Err(Error::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let claims = Claims {
            sub: "user".into(),
            exp: now() + 60,
        };
        let token = jwt_encode(&claims, &JwtKeys::new(b"one")).unwrap();
        assert!(matches!(
            jwt_decode::<Claims>(&token, &JwtKeys::new(b"two")),
            Err(Error::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage() {
        let keys = JwtKeys::new(b"secret");
        assert!(matches!(
            jwt_decode::<Claims>("not.a.token", &keys),
            Err(Error::InvalidToken)
        ));
    }
}
