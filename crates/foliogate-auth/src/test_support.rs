//! Shared fixtures for unit tests.

use foliogate_core::config::AuthConfig;

/// Auth configuration with a minimal Argon2 work factor so hashing
/// stays fast in tests.
pub(crate) fn fast_auth_config() -> AuthConfig {
    AuthConfig {
        access_token_secret: "unit-test-access-secret".to_string(),
        refresh_token_secret: "unit-test-refresh-secret".to_string(),
        access_ttl_days: 7,
        refresh_ttl_days: 30,
        reset_token_ttl_minutes: 10,
        password_min_length: 8,
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        development_mode: true,
    }
}
