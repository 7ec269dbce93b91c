//! Token creation with per-kind signing secrets and TTLs.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use foliogate_core::config::AuthConfig;
use foliogate_core::error::AppError;
use foliogate_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims, TokenKind};

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    /// Access token TTL in days.
    access_ttl_days: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl_days", &self.access_ttl_days)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl_days: config.access_ttl_days as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Issues an access token carrying the user's id, email, and role.
    pub fn issue_access(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::days(self.access_ttl_days);

        let claims = AccessClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, exp))
    }

    /// Issues a refresh token carrying only the subject and kind marker.
    pub fn issue_refresh(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let claims = RefreshClaims {
            sub: user.id,
            kind: TokenKind::Refresh,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok((token, exp))
    }

    /// Issues a new access + refresh token pair for the given user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_access(user)?;
        let (refresh_token, refresh_expires_at) = self.issue_refresh(user)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}
