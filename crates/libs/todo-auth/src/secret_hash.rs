//! Password hashing with Argon2id.
//!
//! Argon2 is deliberately slow, so the async entry points run it on tokio's
//! blocking pool and leave the request executor free.
//!
//! ```rust
//! use todo_auth::secret_hash::{hash_password, verify_password};
//!
//! # #[tokio::main]
//! # async fn main() -> todo_auth::prelude::Result<()> {
//! let stored = hash_password("user_password_123").await?;
//! assert!(verify_password("user_password_123", &stored).await?);
//! assert!(!verify_password("wrong_password", &stored).await?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use tokio::task;

use crate::prelude::*;

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hashes `plaintext` under a fresh random salt and returns a PHC string.
pub fn hash_password_blocking(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(Error::Hash)
}

/// Checks `plaintext` against a stored PHC string.
///
/// A mismatch is `Ok(false)`. A stored value that is not a PHC string is
/// [`Error::MalformedHash`]; anything else going wrong inside Argon2 is
/// [`Error::Hash`].
pub fn verify_password_blocking(plaintext: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(Error::MalformedHash)?;
    match hasher().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(Error::Hash(err)),
    }
}

/// [`hash_password_blocking`] on the blocking pool.
pub async fn hash_password(plaintext: &str) -> Result<String> {
    let plaintext = plaintext.to_owned();
    task::spawn_blocking(move || hash_password_blocking(&plaintext))
        .await
        .map_err(|_| Error::HashWorker)?
}

/// [`verify_password_blocking`] on the blocking pool.
pub async fn verify_password(plaintext: &str, stored: &str) -> Result<bool> {
    let (plaintext, stored) = (plaintext.to_owned(), stored.to_owned());
    task::spawn_blocking(move || verify_password_blocking(&plaintext, &stored))
        .await
        .map_err(|_| Error::HashWorker)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_phc_string() {
        let first = hash_password_blocking("same-password").unwrap();
        let second = hash_password_blocking("same-password").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password_blocking("same-password", &first).unwrap());
        assert!(verify_password_blocking("same-password", &second).unwrap());
    }

    #[test]
    fn test_mismatch_is_false_not_error() {
        let stored = hash_password_blocking("pw").unwrap();
        assert!(!verify_password_blocking("pw2", &stored).unwrap());
        assert!(!verify_password_blocking("", &stored).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(matches!(
            verify_password_blocking("pw", "not-a-valid-hash"),
            Err(Error::MalformedHash(_))
        ));
        assert!(matches!(
            verify_password_blocking("pw", ""),
            Err(Error::MalformedHash(_))
        ));
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let stored = hash_password("pw").await.unwrap();
        assert!(verify_password("pw", &stored).await.unwrap());
        assert!(!verify_password("nope", &stored).await.unwrap());
        assert!(matches!(
            verify_password("pw", "garbage").await,
            Err(Error::MalformedHash(_))
        ));
    }
}
