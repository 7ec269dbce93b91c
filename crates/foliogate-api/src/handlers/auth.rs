//! Auth handlers — register, login, logout, refresh, password reset,
//! email verification, and profile.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use foliogate_auth::session::Registration;

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
    ResendVerificationRequest, ResetPasswordRequest,
};
use crate::dto::response::{
    ApiResponse, AuthResponse, MessageResponse, TokenIssuedResponse, TokenResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let outcome = state
        .session_manager
        .register(Registration {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    // Without a mail transport, development mode surfaces the token in
    // the log so manual verification is possible.
    if state.config.auth.development_mode {
        tracing::debug!(
            token = %outcome.verification_token,
            "Verification token issued"
        );
    }

    let body = AuthResponse::new(&outcome.session.user, outcome.session.tokens);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(body))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let session = state.session_manager.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(AuthResponse::new(
        &session.user,
        session.tokens,
    ))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .session_manager
        .logout(auth.id, req.refresh_token.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(TokenResponse::from(tokens))))
}

/// POST /api/auth/forgot-password
///
/// Always answers with the same message, whether or not the email
/// matched an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<TokenIssuedResponse>>, ApiError> {
    let raw = state.session_manager.forgot_password(&req.email).await?;

    let token = if state.config.auth.development_mode {
        raw
    } else {
        None
    };

    Ok(Json(ApiResponse::ok(TokenIssuedResponse {
        message: "If that email is registered, a reset link has been sent".to_string(),
        token,
    })))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .session_manager
        .reset_password(&req.token, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password has been reset. Please log in again",
    ))))
}

/// GET /api/auth/verify-email/{token}
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.verify_email(&token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Email verified successfully",
    ))))
}

/// POST /api/auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResendVerificationRequest>,
) -> Result<Json<ApiResponse<TokenIssuedResponse>>, ApiError> {
    let raw = state.session_manager.resend_verification(&req.email).await?;

    let token = if state.config.auth.development_mode {
        raw
    } else {
        None
    };

    Ok(Json(ApiResponse::ok(TokenIssuedResponse {
        message: "If that email is registered, a verification link has been sent".to_string(),
        token,
    })))
}

/// GET /api/auth/profile
pub async fn profile(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(&auth.0)))
}
