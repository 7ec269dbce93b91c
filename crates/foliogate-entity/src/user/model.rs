//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered identity in the FolioGate system.
///
/// Credential material (`password_hash`, `refresh_tokens`,
/// `verification_token`, `password_reset_digest`/`_expires_at`) is never
/// serialized into external representations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address; unique case-insensitively, the lookup key.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Pending email-verification token, cleared once consumed.
    #[serde(skip_serializing, default)]
    pub verification_token: Option<String>,
    /// SHA-256 digest of the pending password-reset token.
    #[serde(skip_serializing, default)]
    pub password_reset_digest: Option<String>,
    /// Absolute expiry of the pending reset token; always paired with
    /// the digest and cleared together with it.
    #[serde(skip_serializing, default)]
    pub password_reset_expires_at: Option<DateTime<Utc>>,
    /// Currently-valid refresh tokens, one per active session.
    #[serde(skip_serializing, default)]
    pub refresh_tokens: Vec<String>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check whether the given refresh token is currently valid for this user.
    pub fn has_refresh_token(&self, token: &str) -> bool {
        self.refresh_tokens.iter().any(|t| t == token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address (stored lowercased).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Initial email-verification token.
    pub verification_token: Option<String>,
}
