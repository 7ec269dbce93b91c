//! Custom Axum extractors.

pub mod auth;
pub mod validated;

pub use auth::{AuthUser, MaybeAuthUser};
pub use validated::ValidatedJson;
