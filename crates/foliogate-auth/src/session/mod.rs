//! Session lifecycle management.

pub mod manager;

pub use manager::{AuthSession, Registration, RegisterOutcome, SessionManager};
