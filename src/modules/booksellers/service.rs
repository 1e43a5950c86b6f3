use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Role, StoreProfile, USER_COLUMNS, User};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{ApprovalAction, BooksellerFilterParams, PaginatedBooksellersResponse};

pub struct BooksellerService;

impl BooksellerService {
    #[instrument(skip(db, filter))]
    pub async fn list_booksellers(
        db: &PgPool,
        filter: BooksellerFilterParams,
    ) -> Result<PaginatedBooksellersResponse, AppError> {
        let where_clause =
            "WHERE role = 'bookseller' AND ($1::store_status IS NULL OR store_status = $1)";

        let select = format!(
            "SELECT {USER_COLUMNS} FROM users {where_clause} \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );

        let data = sqlx::query_as::<_, User>(&select)
            .bind(filter.status)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to list booksellers")
            .map_err(AppError::database)?;

        let count = format!("SELECT COUNT(*) FROM users {where_clause}");

        let total = sqlx::query_scalar::<_, i64>(&count)
            .bind(filter.status)
            .fetch_one(db)
            .await
            .context("Failed to count booksellers")
            .map_err(AppError::database)?;

        Ok(PaginatedBooksellersResponse {
            data,
            meta: PaginationMeta::new(total, &filter.pagination),
        })
    }

    /// Applies an admin approval action as a single update. The target must
    /// exist and be a bookseller; beyond that any state may be rewritten, so
    /// re-approving an approved store succeeds and changes nothing.
    #[instrument(skip(db), fields(target = %target_id, action = ?action))]
    pub async fn transition(
        db: &PgPool,
        target_id: Uuid,
        action: ApprovalAction,
    ) -> Result<User, AppError> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(target_id)
            .fetch_optional(db)
            .await
            .context("Failed to load approval target")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        match role {
            Role::Bookseller => {}
            Role::User | Role::Admin => {
                return Err(AppError::bad_request("User is not a bookseller"));
            }
        }

        let update = format!(
            "UPDATE users SET store_status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&update)
            .bind(target_id)
            .bind(action.target_status())
            .fetch_one(db)
            .await
            .context("Failed to apply approval transition")
            .map_err(AppError::database)
    }

    /// The bookseller-facing view of their own store record.
    #[instrument(skip(db))]
    pub async fn get_store(db: &PgPool, user_id: Uuid) -> Result<StoreProfile, AppError> {
        let select = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&select)
            .bind(user_id)
            .fetch_optional(db)
            .await
            .context("Failed to load store profile")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        match (user.store_name, user.store_status) {
            (Some(store_name), Some(store_status)) => Ok(StoreProfile {
                store_name,
                store_status,
                store_phone: user.store_phone,
                store_address: user.store_address,
            }),
            _ => Err(AppError::not_found("No store registered for this account")),
        }
    }
}
