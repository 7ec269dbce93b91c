//! Token verification with per-kind secrets.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;

use foliogate_core::config::AuthConfig;

use super::TokenError;
use super::claims::{AccessClaims, RefreshClaims, TokenKind};

/// Verifies access and refresh tokens against their dedicated secrets.
#[derive(Clone)]
pub struct TokenDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode_with(&self.access_key, token)
    }

    /// Decodes and validates a refresh token string.
    ///
    /// A token of the wrong kind fails identically to a forged one.
    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let claims: RefreshClaims = self.decode_with(&self.refresh_key, token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    fn decode_with<C: DeserializeOwned>(
        &self,
        key: &DecodingKey,
        token: &str,
    ) -> Result<C, TokenError> {
        decode::<C>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
