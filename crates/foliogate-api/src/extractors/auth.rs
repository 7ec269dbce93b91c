//! Authentication extractors — pull the access token from the
//! Authorization header, validate it, and load the account it names.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use foliogate_core::error::AppError;
use foliogate_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user available in handlers.
///
/// The account is re-loaded on every request, so a deleted user is
/// rejected immediately even while their access token is still within
/// its validity window.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Optional variant of [`AuthUser`] for routes that adapt to an
/// authenticated caller but also serve anonymous ones.
///
/// Any failure along the way (missing or malformed header, invalid or
/// expired token, deleted user) yields `MaybeAuthUser(None)` instead of
/// a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

/// Shared resolution path for both extractors.
async fn bearer_user(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Access token is required"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Access token is required"))?;

    let claims = state.token_decoder.decode_access(token)?;

    state
        .store
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::authentication("User no longer exists"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthUser(bearer_user(parts, state).await?))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(bearer_user(parts, state).await.ok()))
    }
}
