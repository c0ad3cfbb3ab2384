//! Authentication error kinds.
//!
//! Token variants all end up as 401 at the HTTP edge. The hashing variants
//! are server faults and end up as 500.

#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    /// Bad signature, wrong algorithm, wrong token kind or garbled input.
    #[error("access token rejected")]
    InvalidToken,

    /// No bearer token on a request that needs one.
    #[error("no access token presented")]
    TokenMissing,

    /// Signature is fine but `exp` has passed.
    #[error("access token expired")]
    TokenExpired,

    #[error("could not sign token: {0}")]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    /// Argon2 failed while hashing or verifying.
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    /// A stored credential is not a PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(argon2::password_hash::Error),

    /// The blocking task running Argon2 panicked or was cancelled.
    #[error("password hashing task did not complete")]
    HashWorker,
}

impl Error {
    /// True for failures caused by the presented credentials rather than by
    /// the server.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken | Self::TokenMissing | Self::TokenExpired
        )
    }
}
