//! Route-level middleware helpers.

pub mod rbac;
