use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateOrderDto, Order};
use super::service::OrderService;

/// Place an order
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderDto>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = OrderService::create_order(&state.db, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the caller's orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "The caller's orders", body = Vec<Order>),
        (status = 401, description = "Missing or malformed credential", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip_all)]
pub async fn list_orders(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderService::list_own(&state.db, auth_user.id()).await?;
    Ok(Json(orders))
}

/// Get a single order (owner or admin)
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 403, description = "Not the owner of this order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip_all, fields(order_id = %id))]
pub async fn get_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = OrderService::get_order(&state.db, &auth_user.0, id).await?;
    Ok(Json(order))
}
