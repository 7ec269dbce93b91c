//! Administrative user lookup.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use foliogate_core::error::AppError;
use foliogate_entity::user::UserRole;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_roles;
use crate::state::AppState;

/// GET /api/users/{id} (admin only)
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_roles(&auth, &[UserRole::Admin])?;

    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
