use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    ChangePasswordDto, PaginatedUsersResponse, SetActiveDto, UpdateProfileDto, User,
    UserFilterParams,
};
use super::service::UserService;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse),
        (status = 403, description = "Invalid token or deactivated account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.id()).await?;
    Ok(Json(user))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Username already exists", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_profile(&state.db, auth_user.id(), dto).await?;
    Ok(Json(user))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/users/profile/change-password",
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Current password is incorrect", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<StatusCode, AppError> {
    UserService::change_password(&state.db, auth_user.id(), dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deactivate the caller's account (soft delete)
#[utoipa::path(
    delete,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Account deactivated", body = User),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn deactivate_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::deactivate(&state.db, auth_user.id()).await?;
    Ok(Json(user))
}

/// List users (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("username" = Option<String>, Query, description = "Filter by username substring"),
        ("email" = Option<String>, Query, description = "Filter by email substring"),
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Paginated users", body = PaginatedUsersResponse),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<UserFilterParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let users = UserService::list_users(&state.db, filter).await?;
    Ok(Json(users))
}

/// Activate or deactivate an account (admin)
#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = %id))]
pub async fn set_user_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(dto): Json<SetActiveDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::set_active(&state.db, id, dto.is_active).await?;
    Ok(Json(user))
}
