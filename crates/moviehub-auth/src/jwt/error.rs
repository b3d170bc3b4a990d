//! Token validation failures.

use thiserror::Error;

use moviehub_core::error::{AppError, ErrorKind};

/// Why a token was rejected.
///
/// Callers outside the auth crate only ever see a single authentication
/// error; the variant survives as the error source for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signature does not match the secret for the expected kind, or
    /// the token was signed with another algorithm.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
    /// The token is of the other kind.
    #[error("token is of the wrong kind")]
    WrongKind,
    /// The token could not be parsed.
    #[error("token is malformed")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::with_source(ErrorKind::Authentication, "Invalid or expired token", err)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtKind;
        match err.kind() {
            JwtKind::InvalidSignature | JwtKind::InvalidAlgorithm => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}
