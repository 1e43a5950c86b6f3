use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{AddFavoriteDto, Favorite, FavoriteWithBook};
use super::service::FavoriteService;

/// List the caller's favorites
#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "The caller's favorites", body = Vec<FavoriteWithBook>),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
#[instrument(skip_all)]
pub async fn list_favorites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<FavoriteWithBook>>, AppError> {
    let favorites = FavoriteService::list(&state.db, auth_user.id()).await?;
    Ok(Json(favorites))
}

/// Add a book to favorites
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = AddFavoriteDto,
    responses(
        (status = 201, description = "Favorite created", body = Favorite),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 409, description = "Book is already in favorites", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
#[instrument(skip_all)]
pub async fn add_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<AddFavoriteDto>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    let favorite = FavoriteService::add(&state.db, auth_user.id(), dto.book_id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove a book from favorites
#[utoipa::path(
    delete,
    path = "/api/favorites/{book_id}",
    params(("book_id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "Favorite not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
#[instrument(skip_all, fields(book_id = %book_id))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(book_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    FavoriteService::remove(&state.db, auth_user.id(), book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
