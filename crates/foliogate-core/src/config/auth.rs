//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication, token lifetime, and credential-hashing configuration.
///
/// Both signing secrets are read once at startup and injected into the
/// token codec; business logic never reads them from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing (HMAC-SHA256).
    pub access_token_secret: String,
    /// Secret key for refresh-token signing. Must differ from the access
    /// secret so one leaked key cannot forge the other token kind.
    pub refresh_token_secret: String,
    /// Access token TTL in days.
    #[serde(default = "default_access_ttl_days")]
    pub access_ttl_days: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u64,
    /// Password-reset token validity window in minutes.
    #[serde(default = "default_reset_ttl_minutes")]
    pub reset_token_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// When true, reset and verification raw tokens are echoed back in
    /// API responses instead of being delivered out-of-band. Never enable
    /// in production.
    #[serde(default)]
    pub development_mode: bool,
}

impl AuthConfig {
    /// Validates secret material at startup.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.is_empty() || self.refresh_token_secret.is_empty() {
            return Err(AppError::configuration(
                "Token signing secrets must not be empty",
            ));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(AppError::configuration(
                "Access and refresh token secrets must differ",
            ));
        }
        Ok(())
    }
}

fn default_access_ttl_days() -> u64 {
    7
}

fn default_refresh_ttl_days() -> u64 {
    30
}

fn default_reset_ttl_minutes() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}

fn default_argon2_memory() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
