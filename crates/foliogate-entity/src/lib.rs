//! # foliogate-entity
//!
//! Domain entity models for FolioGate.

pub mod user;

pub use user::{NewUser, User, UserRole};
