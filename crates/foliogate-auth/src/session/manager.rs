//! Session lifecycle manager — registration, login, refresh rotation,
//! password reset, and email verification flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use foliogate_core::config::AuthConfig;
use foliogate_core::error::AppError;
use foliogate_core::result::AppResult;
use foliogate_database::store::IdentityStore;
use foliogate_entity::user::{NewUser, User, UserRole};

use crate::onetime;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::encoder::TokenPair;
use crate::token::{TokenDecoder, TokenEncoder};

/// Input for the registration flow.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it leaves this module.
    pub password: String,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued token pair.
    pub tokens: TokenPair,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    /// The new session.
    pub session: AuthSession,
    /// Raw email-verification token. Callers must only surface this in
    /// development mode; in production it travels out-of-band.
    pub verification_token: String,
}

/// Manages the complete session lifecycle against the identity store.
#[derive(Clone)]
pub struct SessionManager {
    /// Identity persistence.
    store: Arc<dyn IdentityStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    password_validator: PasswordValidator,
    /// Token codec, issuing side.
    encoder: Arc<TokenEncoder>,
    /// Token codec, verifying side.
    decoder: Arc<TokenDecoder>,
    /// Auth configuration.
    config: AuthConfig,
    /// Digest verified when no account matches a login, keeping the
    /// unknown-email path on the same time budget as a real mismatch.
    dummy_hash: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<TokenEncoder>,
        decoder: Arc<TokenDecoder>,
        config: AuthConfig,
    ) -> Result<Self, AppError> {
        let password_validator = PasswordValidator::new(&config);
        let dummy_hash = hasher.hash_password(&onetime::generate().raw)?;

        Ok(Self {
            store,
            hasher,
            password_validator,
            encoder,
            decoder,
            config,
            dummy_hash,
        })
    }

    /// Registers a new account.
    ///
    /// Fails with a Conflict error when the email is already taken
    /// (case-insensitively). On success the account starts unverified
    /// with role `user`, a token pair is issued, and the refresh token
    /// is stored as the first valid session.
    pub async fn register(&self, reg: Registration) -> AppResult<RegisterOutcome> {
        self.password_validator.validate(&reg.password)?;

        let password_hash = self.hasher.hash_password(&reg.password)?;
        let verification = onetime::generate();

        let user = self
            .store
            .create(NewUser {
                first_name: reg.first_name,
                last_name: reg.last_name,
                email: reg.email,
                password_hash,
                role: UserRole::User,
                verification_token: Some(verification.raw.clone()),
            })
            .await?;

        let tokens = self.encoder.issue_pair(&user)?;
        self.store
            .add_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(RegisterOutcome {
            session: AuthSession { user, tokens },
            verification_token: verification.raw,
        })
    }

    /// Authenticates an email/password pair and opens a new session.
    ///
    /// Unknown email and wrong password produce the identical generic
    /// error so callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                // Burn a comparable amount of hashing work before rejecting.
                let _ = self.hasher.verify_password(password, &self.dummy_hash);
                return Err(Self::invalid_credentials());
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(Self::invalid_credentials());
        }

        let now = Utc::now();
        let tokens = self.encoder.issue_pair(&user)?;
        self.store
            .record_login(user.id, &tokens.refresh_token, now)
            .await?;

        info!(user_id = %user.id, "Login successful");

        let mut user = user;
        user.last_login_at = Some(now);
        Ok(AuthSession { user, tokens })
    }

    /// Closes a session by revoking the presented refresh token.
    ///
    /// Revoking an absent value is a no-op; logout always succeeds for
    /// an authenticated caller.
    pub async fn logout(&self, user_id: Uuid, refresh_token: Option<&str>) -> AppResult<()> {
        if let Some(token) = refresh_token {
            self.store.remove_refresh_token(user_id, token).await?;
        }
        info!(user_id = %user_id, "Logout completed");
        Ok(())
    }

    /// Exchanges a valid refresh token for a fresh token pair, rotating
    /// the stored value.
    ///
    /// Each refresh token is single-use: the old value is atomically
    /// replaced by the new one, and presenting an already-rotated token
    /// is rejected identically to a forged one.
    pub async fn refresh(&self, presented: &str) -> AppResult<TokenPair> {
        let claims = self
            .decoder
            .decode_refresh(presented)
            .map_err(|_| Self::invalid_refresh())?;

        let user = self
            .store
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(Self::invalid_refresh)?;

        let tokens = self.encoder.issue_pair(&user)?;
        let rotated = self
            .store
            .rotate_refresh_token(user.id, presented, &tokens.refresh_token)
            .await?;

        if !rotated {
            warn!(user_id = %user.id, "Refresh rejected: token not in valid set");
            return Err(Self::invalid_refresh());
        }

        info!(user_id = %user.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Starts the password-reset flow.
    ///
    /// Returns the raw reset token when the email matched an account,
    /// `None` otherwise; the two outcomes are indistinguishable in the
    /// API response, closing the enumeration channel.
    pub async fn forgot_password(&self, email: &str) -> AppResult<Option<String>> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Password reset requested for unknown email");
                return Ok(None);
            }
        };

        let token = onetime::generate();
        let expires_at =
            Utc::now() + chrono::Duration::minutes(self.config.reset_token_ttl_minutes as i64);

        self.store
            .set_reset_token(user.id, &token.digest, expires_at)
            .await?;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(Some(token.raw))
    }

    /// Completes the password-reset flow.
    ///
    /// On success the reset digest and expiry are cleared together and
    /// every outstanding refresh token is revoked, forcing re-login on
    /// all devices.
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> AppResult<()> {
        self.password_validator.validate(new_password)?;

        let digest = onetime::digest_of(raw_token);
        let user = self
            .store
            .find_by_reset_digest(&digest)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid or expired reset token"))?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.store.reset_password(user.id, &password_hash).await?;

        info!(user_id = %user.id, "Password reset completed; all sessions revoked");
        Ok(())
    }

    /// Consumes an email-verification token.
    pub async fn verify_email(&self, raw_token: &str) -> AppResult<()> {
        let user = self
            .store
            .find_by_verification_token(raw_token)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid verification token"))?;

        self.store.mark_email_verified(user.id).await?;

        info!(user_id = %user.id, "Email verified");
        Ok(())
    }

    /// Issues a fresh verification token for an unverified account.
    ///
    /// Returns `None` for unknown emails, mirroring the forgot-password
    /// enumeration discipline. An already-verified account is a visible
    /// Conflict since the caller proved knowledge of a live session
    /// context anyway.
    pub async fn resend_verification(&self, email: &str) -> AppResult<Option<String>> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Verification resend requested for unknown email");
                return Ok(None);
            }
        };

        if user.email_verified {
            return Err(AppError::conflict("Email is already verified"));
        }

        let token = onetime::generate();
        self.store.set_verification_token(user.id, &token.raw).await?;

        info!(user_id = %user.id, "Verification token reissued");
        Ok(Some(token.raw))
    }

    fn invalid_credentials() -> AppError {
        AppError::authentication("Invalid email or password")
    }

    fn invalid_refresh() -> AppError {
        AppError::authentication("Invalid refresh token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fast_auth_config;
    use foliogate_core::error::ErrorKind;
    use foliogate_database::repositories::memory::MemoryIdentityStore;

    const PASSWORD: &str = "mauve-Teapot-41";

    fn manager_with(config: AuthConfig) -> SessionManager {
        let store = Arc::new(MemoryIdentityStore::new());
        let hasher = Arc::new(PasswordHasher::new(&config).unwrap());
        let encoder = Arc::new(TokenEncoder::new(&config));
        let decoder = Arc::new(TokenDecoder::new(&config));
        SessionManager::new(store, hasher, encoder, decoder, config).unwrap()
    }

    fn manager() -> SessionManager {
        manager_with(fast_auth_config())
    }

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_tokens_and_stores_refresh() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();

        assert_eq!(outcome.session.user.email, "a@x.com");
        assert_eq!(outcome.session.user.role, UserRole::User);
        assert!(!outcome.session.user.email_verified);
        assert!(!outcome.verification_token.is_empty());

        let stored = mgr
            .store
            .find_by_id(outcome.session.user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.has_refresh_token(&outcome.session.tokens.refresh_token));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let mgr = manager();
        mgr.register(registration("a@x.com")).await.unwrap();
        let err = mgr.register(registration("A@X.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_weak_password_rejected_at_register() {
        let mgr = manager();
        let mut reg = registration("weak@x.com");
        reg.password = "password".to_string();
        let err = mgr.register(reg).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_success_updates_last_login() {
        let mgr = manager();
        mgr.register(registration("a@x.com")).await.unwrap();

        let session = mgr.login("a@x.com", PASSWORD).await.unwrap();
        assert!(session.user.last_login_at.is_some());

        let stored = mgr.store.find_by_id(session.user.id).await.unwrap().unwrap();
        assert!(stored.has_refresh_token(&session.tokens.refresh_token));
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_login_errors_do_not_reveal_which_part_failed() {
        let mgr = manager();
        mgr.register(registration("a@x.com")).await.unwrap();

        let wrong_password = mgr.login("a@x.com", "Wrong-Password-1").await.unwrap_err();
        let unknown_email = mgr.login("nobody@x.com", PASSWORD).await.unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::Authentication);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn test_refresh_rotation_is_single_use() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();
        let original = outcome.session.tokens.refresh_token.clone();

        let rotated = mgr.refresh(&original).await.unwrap();
        assert_ne!(rotated.refresh_token, original);

        // Replaying the consumed token is indistinguishable from forgery.
        let err = mgr.refresh(&original).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid refresh token");

        // The rotated-in token keeps working.
        mgr.refresh(&rotated.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let mgr = manager();
        let err = mgr.refresh("not-a-token").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_logout_revokes_presented_token_and_is_idempotent() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();
        let user_id = outcome.session.user.id;
        let token = outcome.session.tokens.refresh_token;

        mgr.logout(user_id, Some(&token)).await.unwrap();
        assert!(mgr.refresh(&token).await.is_err());

        // Removing again, or logging out without a token, is a no-op.
        mgr.logout(user_id, Some(&token)).await.unwrap();
        mgr.logout(user_id, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_flow_revokes_all_sessions() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();
        let first_refresh = outcome.session.tokens.refresh_token.clone();
        let second_refresh = mgr.login("a@x.com", PASSWORD).await.unwrap().tokens.refresh_token;

        let raw = mgr.forgot_password("a@x.com").await.unwrap().unwrap();
        mgr.reset_password(&raw, "fresh-Anchor-77").await.unwrap();

        // Every pre-reset refresh token is dead.
        assert!(mgr.refresh(&first_refresh).await.is_err());
        assert!(mgr.refresh(&second_refresh).await.is_err());

        // Old password no longer works, new one does.
        assert!(mgr.login("a@x.com", PASSWORD).await.is_err());
        mgr.login("a@x.com", "fresh-Anchor-77").await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_token_is_single_use() {
        let mgr = manager();
        mgr.register(registration("a@x.com")).await.unwrap();

        let raw = mgr.forgot_password("a@x.com").await.unwrap().unwrap();
        mgr.reset_password(&raw, "fresh-Anchor-77").await.unwrap();

        let err = mgr.reset_password(&raw, "other-Anchor-78").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_expired_reset_token_rejected() {
        let mut config = fast_auth_config();
        config.reset_token_ttl_minutes = 0;
        let mgr = manager_with(config);
        mgr.register(registration("a@x.com")).await.unwrap();

        let raw = mgr.forgot_password("a@x.com").await.unwrap().unwrap();
        let err = mgr.reset_password(&raw, "fresh-Anchor-77").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid or expired reset token");
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email_is_silent() {
        let mgr = manager();
        assert!(mgr.forgot_password("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_verify_email_consumes_token() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();

        mgr.verify_email(&outcome.verification_token).await.unwrap();

        let user = mgr
            .store
            .find_by_id(outcome.session.user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(user.email_verified);
        assert!(user.verification_token.is_none());

        // Second consumption fails.
        let err = mgr.verify_email(&outcome.verification_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_resend_verification() {
        let mgr = manager();
        let outcome = mgr.register(registration("a@x.com")).await.unwrap();

        let fresh = mgr.resend_verification("a@x.com").await.unwrap().unwrap();
        assert_ne!(fresh, outcome.verification_token);

        // The replaced token no longer verifies; the fresh one does.
        assert!(mgr.verify_email(&outcome.verification_token).await.is_err());
        mgr.verify_email(&fresh).await.unwrap();

        let err = mgr.resend_verification("a@x.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        assert!(mgr.resend_verification("nobody@x.com").await.unwrap().is_none());
    }
}
