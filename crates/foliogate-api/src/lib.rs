//! # foliogate-api
//!
//! HTTP API layer for FolioGate built on Axum.
//!
//! Provides the REST endpoints for registration, login, token refresh,
//! password reset, and email verification, plus the extractors, DTOs,
//! and error mapping that support them.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
