//! Identity record store contract.
//!
//! The session layer talks to persistence exclusively through this trait.
//! Implementations own durability; policy (what to mutate and when) lives
//! in the session manager.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use foliogate_core::result::AppResult;
use foliogate_entity::user::{NewUser, User};

/// Abstract persistence of the user identity record.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user whose stored reset digest matches and whose reset
    /// window has not yet expired.
    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<User>>;

    /// Find a user by exact verification-token match.
    async fn find_by_verification_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Create a new user. Fails with a Conflict error when the email is
    /// already taken (case-insensitively).
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Append a refresh token to the user's valid set.
    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()>;

    /// Remove a refresh token from the valid set. Removing an absent
    /// value is a no-op, not an error.
    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()>;

    /// Atomically replace `old` with `new` in the valid set, only if
    /// `old` is still present. Returns `false` when `old` was absent
    /// (already rotated, revoked, or forged) — the caller treats that as
    /// an invalid token. Two concurrent rotations of the same token
    /// cannot both observe `true`.
    async fn rotate_refresh_token(&self, id: Uuid, old: &str, new: &str) -> AppResult<bool>;

    /// Record a successful login: set the last-login timestamp and store
    /// the new refresh token in a single save.
    async fn record_login(&self, id: Uuid, token: &str, at: DateTime<Utc>) -> AppResult<()>;

    /// Store a pending password-reset digest with its expiry instant.
    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Complete a password reset: set the new hash, clear the reset
    /// digest and expiry together, and revoke every refresh token, all in
    /// a single save.
    async fn reset_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Store a fresh email-verification token.
    async fn set_verification_token(&self, id: Uuid, token: &str) -> AppResult<()>;

    /// Mark the email verified and clear the verification token.
    async fn mark_email_verified(&self, id: Uuid) -> AppResult<()>;
}
