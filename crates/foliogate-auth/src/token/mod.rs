//! Dual-secret token codec.
//!
//! Access and refresh tokens are signed with independent secrets so a
//! leaked access-token secret cannot mint long-lived refresh tokens, and
//! vice versa.

pub mod claims;
pub mod decoder;
pub mod encoder;

use thiserror::Error;

use foliogate_core::error::AppError;

pub use claims::{AccessClaims, RefreshClaims, TokenKind};
pub use decoder::TokenDecoder;
pub use encoder::{TokenEncoder, TokenPair};

/// Verification failure kinds.
///
/// Expiry is distinguished from forgery/malformation because the request
/// gate reports them with different messages, though both are rejected
/// as unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's expiry has elapsed.
    #[error("token has expired")]
    Expired,
    /// The signature is invalid or the structure cannot be parsed.
    #[error("invalid token")]
    Invalid,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::authentication("Token has expired"),
            TokenError::Invalid => AppError::authentication("Invalid token"),
        }
    }
}
