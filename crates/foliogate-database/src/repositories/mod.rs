//! Concrete implementations of the identity store contract.

pub mod memory;
pub mod user;

pub use memory::MemoryIdentityStore;
pub use user::UserRepository;
