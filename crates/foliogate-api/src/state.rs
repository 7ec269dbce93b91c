//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foliogate_auth::{PasswordHasher, SessionManager, TokenDecoder, TokenEncoder};
use foliogate_core::config::AppConfig;
use foliogate_core::error::AppError;
use foliogate_database::store::IdentityStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks. Handlers see the
/// identity store only through the trait object, so the same router
/// runs against Postgres in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity persistence.
    pub store: Arc<dyn IdentityStore>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Access-token validator used by the auth extractor.
    pub token_decoder: Arc<TokenDecoder>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the auth components on top of the given identity store.
    pub fn new(config: AppConfig, store: Arc<dyn IdentityStore>) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let encoder = Arc::new(TokenEncoder::new(&config.auth));
        let decoder = Arc::new(TokenDecoder::new(&config.auth));

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&store),
            hasher,
            encoder,
            Arc::clone(&decoder),
            config.auth.clone(),
        )?);

        Ok(Self {
            config: Arc::new(config),
            store,
            session_manager,
            token_decoder: decoder,
        })
    }
}
