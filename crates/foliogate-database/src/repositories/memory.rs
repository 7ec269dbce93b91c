//! In-memory identity store for tests and local development.
//!
//! All mutations take the write lock, so per-record operations are
//! serialized and the rotation check-and-swap is atomic, matching the
//! PostgreSQL implementation's guarantees.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use foliogate_core::error::AppError;
use foliogate_core::result::AppResult;
use foliogate_entity::user::{NewUser, User};

use crate::store::IdentityStore;

/// Identity store backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's role. There is no promotion endpoint, so
    /// tests and local seeding set admin roles directly.
    pub async fn set_role(&self, id: Uuid, role: foliogate_entity::user::UserRole) -> AppResult<()> {
        self.mutate(id, |u| u.role = role).await
    }

    async fn mutate<F>(&self, id: Uuid, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        f(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let needle = email.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.to_lowercase() == needle)
            .cloned())
    }

    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<User>> {
        let now = Utc::now();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| {
                u.password_reset_digest.as_deref() == Some(digest)
                    && u.password_reset_expires_at.map(|t| t > now).unwrap_or(false)
            })
            .cloned())
    }

    async fn find_by_verification_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let email = new_user.email.to_lowercase();

        if users.values().any(|u| u.email == email) {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            email_verified: false,
            verification_token: new_user.verification_token,
            password_reset_digest: None,
            password_reset_expires_at: None,
            refresh_tokens: Vec::new(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        self.mutate(id, |u| u.refresh_tokens.push(token.to_string()))
            .await
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        self.mutate(id, |u| u.refresh_tokens.retain(|t| t != token))
            .await
    }

    async fn rotate_refresh_token(&self, id: Uuid, old: &str, new: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        match user.refresh_tokens.iter().position(|t| t == old) {
            Some(idx) => {
                user.refresh_tokens[idx] = new.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_login(&self, id: Uuid, token: &str, at: DateTime<Utc>) -> AppResult<()> {
        self.mutate(id, |u| {
            u.refresh_tokens.push(token.to_string());
            u.last_login_at = Some(at);
        })
        .await
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.mutate(id, |u| {
            u.password_reset_digest = Some(digest.to_string());
            u.password_reset_expires_at = Some(expires_at);
        })
        .await
    }

    async fn reset_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.mutate(id, |u| {
            u.password_hash = password_hash.to_string();
            u.password_reset_digest = None;
            u.password_reset_expires_at = None;
            u.refresh_tokens.clear();
        })
        .await
    }

    async fn set_verification_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        self.mutate(id, |u| u.verification_token = Some(token.to_string()))
            .await
    }

    async fn mark_email_verified(&self, id: Uuid) -> AppResult<()> {
        self.mutate(id, |u| {
            u.email_verified = true;
            u.verification_token = None;
        })
        .await
    }
}
