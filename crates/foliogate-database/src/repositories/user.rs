//! PostgreSQL identity store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use foliogate_core::error::{AppError, ErrorKind};
use foliogate_core::result::AppResult;
use foliogate_entity::user::{NewUser, User};

use crate::store::IdentityStore;

/// Repository for user identity records backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &'static str, e: sqlx::Error) -> AppError {
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| Self::db_err("Database health check failed", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Failed to find user by email", e))
    }

    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users
             WHERE password_reset_digest = $1 AND password_reset_expires_at > now()",
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to find user by reset digest", e))
    }

    async fn find_by_verification_token(&self, token: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE verification_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("Failed to find user by verification token", e))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users
                (first_name, last_name, email, password_hash, role, verification_token)
             VALUES ($1, $2, LOWER($3), $4, $5, $6)
             RETURNING *",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(&new_user.verification_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|d| d.is_unique_violation())
                .unwrap_or(false)
            {
                AppError::conflict("A user with this email already exists")
            } else {
                Self::db_err("Failed to create user", e)
            }
        })
    }

    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET refresh_tokens = array_append(refresh_tokens, $2), updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to add refresh token", e))?;
        Ok(())
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET refresh_tokens = array_remove(refresh_tokens, $2), updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to remove refresh token", e))?;
        Ok(())
    }

    async fn rotate_refresh_token(&self, id: Uuid, old: &str, new: &str) -> AppResult<bool> {
        // The `$2 = ANY(...)` guard makes the swap atomic: of two racing
        // rotations of the same token, only one row update can match.
        let result = sqlx::query(
            "UPDATE users
             SET refresh_tokens = array_replace(refresh_tokens, $2, $3), updated_at = now()
             WHERE id = $1 AND $2 = ANY(refresh_tokens)",
        )
        .bind(id)
        .bind(old)
        .bind(new)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to rotate refresh token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn record_login(&self, id: Uuid, token: &str, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET refresh_tokens = array_append(refresh_tokens, $2),
                 last_login_at = $3,
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to record login", e))?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET password_reset_digest = $2,
                 password_reset_expires_at = $3,
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(digest)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to set reset token", e))?;
        Ok(())
    }

    async fn reset_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET password_hash = $2,
                 password_reset_digest = NULL,
                 password_reset_expires_at = NULL,
                 refresh_tokens = '{}',
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to reset password", e))?;
        Ok(())
    }

    async fn set_verification_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET verification_token = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to set verification token", e))?;
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users
             SET email_verified = TRUE, verification_token = NULL, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::db_err("Failed to mark email verified", e))?;
        Ok(())
    }
}
