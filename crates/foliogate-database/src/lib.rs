//! # foliogate-database
//!
//! The identity record store: the abstract [`store::IdentityStore`]
//! contract, its PostgreSQL implementation, and an in-memory
//! implementation used by tests and local development.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::IdentityStore;
