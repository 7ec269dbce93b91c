//! Request DTOs with validation.
//!
//! Length and format checks happen here at the boundary; password
//! strength is enforced deeper down by the session manager so the
//! policy applies to every entry point.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Given name.
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token to rotate.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request body. The refresh token is optional; without it the
/// session simply expires on its own schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    pub refresh_token: Option<String>,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Raw reset token from the forgot-password flow.
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Resend-verification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}
