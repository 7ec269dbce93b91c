//! Role checks for guarded routes.

use foliogate_core::error::AppError;
use foliogate_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Checks that the authenticated user holds one of the allowed roles.
pub fn require_roles(auth: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if !allowed.contains(&auth.role) {
        return Err(AppError::authorization("Insufficient permissions"));
    }
    Ok(())
}
