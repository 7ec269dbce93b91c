//! # foliogate-auth
//!
//! The credential and token-lifecycle subsystem of FolioGate.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and policy enforcement
//! - `token` — dual-secret access/refresh token codec
//! - `onetime` — one-shot random tokens for reset and verification flows
//! - `session` — session lifecycle (register, login, refresh rotation,
//!   password reset, email verification)

pub mod onetime;
#[cfg(test)]
pub(crate) mod test_support;
pub mod password;
pub mod session;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionManager;
pub use token::{AccessClaims, RefreshClaims, TokenDecoder, TokenEncoder, TokenError, TokenPair};
