use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::role::{RequireAdmin, RequireApprovedBookseller};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{AdminStats, SellerStats};
use super::service::StatsService;

/// Seller dashboard counts (approved booksellers only)
#[utoipa::path(
    get,
    path = "/api/stats/seller",
    responses(
        (status = 200, description = "Seller stats", body = SellerStats),
        (status = 403, description = "Not an approved bookseller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
#[instrument(skip_all)]
pub async fn seller_stats(
    State(state): State<AppState>,
    RequireApprovedBookseller(auth_user): RequireApprovedBookseller,
) -> Result<Json<SellerStats>, AppError> {
    let stats = StatsService::seller_stats(&state.db, auth_user.id()).await?;
    Ok(Json(stats))
}

/// System-wide counts (admin)
#[utoipa::path(
    get,
    path = "/api/stats/admin",
    responses(
        (status = 200, description = "Admin stats", body = AdminStats),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
#[instrument(skip_all)]
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<AdminStats>, AppError> {
    let stats = StatsService::admin_stats(&state.db).await?;
    Ok(Json(stats))
}
