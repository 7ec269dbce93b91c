//! Claim sets carried in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foliogate_entity::user::UserRole;

/// Claims embedded in every access token.
///
/// Access tokens are stateless: validity is determined purely by
/// signature and expiry, never by a store lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Claims embedded in every refresh token.
///
/// Deliberately minimal: validity additionally requires membership in
/// the identity's stored refresh-token set, which is what makes refresh
/// tokens revocable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Token kind marker.
    pub kind: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes the two token kinds on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token exchanged for new pairs.
    Refresh,
}
