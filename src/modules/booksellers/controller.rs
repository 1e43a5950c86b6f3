use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{Role, StoreProfile, User};
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;

use super::model::{ApprovalRequest, BooksellerFilterParams, PaginatedBooksellersResponse};
use super::service::BooksellerService;

/// List booksellers, optionally filtered by store status (admin)
#[utoipa::path(
    get,
    path = "/api/booksellers",
    params(
        ("status" = Option<String>, Query, description = "Filter by store status (pending/approved/rejected)"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Paginated booksellers", body = PaginatedBooksellersResponse),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Booksellers"
)]
#[instrument(skip_all)]
pub async fn list_booksellers(
    State(state): State<AppState>,
    Query(filter): Query<BooksellerFilterParams>,
) -> Result<Json<PaginatedBooksellersResponse>, AppError> {
    let booksellers = BooksellerService::list_booksellers(&state.db, filter).await?;
    Ok(Json(booksellers))
}

/// Approve or reject a bookseller's store (admin)
#[utoipa::path(
    post,
    path = "/api/booksellers/{id}/approval",
    params(("id" = Uuid, Path, description = "Bookseller user id")),
    request_body = ApprovalRequest,
    responses(
        (status = 200, description = "Updated bookseller", body = User),
        (status = 400, description = "Target is not a bookseller", body = ErrorResponse),
        (status = 403, description = "Administrator privileges required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Booksellers"
)]
#[instrument(skip_all, fields(target = %id))]
pub async fn transition_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<ApprovalRequest>,
) -> Result<Json<User>, AppError> {
    let user = BooksellerService::transition(&state.db, id, dto.action).await?;

    // Fire-and-forget notification; a mail failure never fails the transition.
    if let (Some(store_name), Some(store_status)) =
        (user.store_name.clone(), user.store_status)
    {
        let email_service = EmailService::new(state.email_config.clone());
        let to_email = user.email.clone();
        let username = user.username.clone();

        tokio::spawn(async move {
            if let Err(err) = email_service
                .send_store_status_update(&to_email, &username, &store_name, store_status)
                .await
            {
                warn!(error = %err.error, "Failed to send store status email");
            }
        });
    }

    Ok(Json(user))
}

/// Get the caller's own store profile (bookseller, any approval state)
#[utoipa::path(
    get,
    path = "/api/booksellers/store",
    responses(
        (status = 200, description = "Store profile", body = StoreProfile),
        (status = 403, description = "Not a bookseller account", body = ErrorResponse),
        (status = 404, description = "No store registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Booksellers"
)]
#[instrument(skip_all)]
pub async fn get_own_store(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<StoreProfile>, AppError> {
    // Pending and rejected sellers may still see their own store state.
    check_role(&auth_user.0, Role::Bookseller)?;

    let store = BooksellerService::get_store(&state.db, auth_user.id()).await?;
    Ok(Json(store))
}
