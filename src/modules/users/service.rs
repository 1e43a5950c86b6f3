use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    ChangePasswordDto, PaginatedUsersResponse, USER_COLUMNS, UpdateProfileDto, User,
    UserFilterParams,
};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let select = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&select)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by id")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let update = format!(
            "UPDATE users SET \
                 username = COALESCE($2, username), \
                 store_phone = COALESCE($3, store_phone), \
                 store_address = COALESCE($4, store_address), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&update)
            .bind(id)
            .bind(dto.username.as_deref().map(str::trim))
            .bind(&dto.store_phone)
            .bind(&dto.store_address)
            .fetch_optional(db)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::bad_request("Username already exists")
                }
                other => AppError::database(
                    anyhow::Error::new(other).context("Failed to update profile"),
                ),
            })?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Verifies the current password before rehashing. The stored digest is
    /// only replaced when the password actually changes.
    #[instrument(skip_all, fields(user_id = %id))]
    pub async fn change_password(
        db: &PgPool,
        id: Uuid,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let current_hash =
            sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await
                .context("Failed to fetch password digest")
                .map_err(AppError::database)?
                .ok_or_else(|| AppError::not_found("User not found"))?;

        let current_password = dto.current_password.clone();
        let digest = current_hash.clone();
        let valid =
            tokio::task::spawn_blocking(move || verify_password(&current_password, &digest))
                .await
                .map_err(AppError::internal)??;

        if !valid {
            return Err(AppError::bad_request("Current password is incorrect"));
        }

        let new_password = dto.new_password.clone();
        let new_hash = tokio::task::spawn_blocking(move || hash_password(&new_password))
            .await
            .map_err(AppError::internal)??;

        sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(&new_hash)
            .execute(db)
            .await
            .context("Failed to update password")
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Soft delete. The row stays; the session verifier rejects the account
    /// on its next request.
    #[instrument(skip(db))]
    pub async fn deactivate(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        Self::set_active(db, id, false).await
    }

    #[instrument(skip(db))]
    pub async fn set_active(db: &PgPool, id: Uuid, is_active: bool) -> Result<User, AppError> {
        let update = format!(
            "UPDATE users SET is_active = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&update)
            .bind(id)
            .bind(is_active)
            .fetch_optional(db)
            .await
            .context("Failed to update active flag")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db, filter))]
    pub async fn list_users(
        db: &PgPool,
        filter: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let where_clause = "WHERE ($1::TEXT IS NULL OR username ILIKE '%' || $1 || '%') \
               AND ($2::TEXT IS NULL OR email ILIKE '%' || $2 || '%') \
               AND ($3::user_role IS NULL OR role = $3)";

        let select = format!(
            "SELECT {USER_COLUMNS} FROM users {where_clause} \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        );

        let data = sqlx::query_as::<_, User>(&select)
            .bind(&filter.username)
            .bind(&filter.email)
            .bind(filter.role)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to list users")
            .map_err(AppError::database)?;

        let count = format!("SELECT COUNT(*) FROM users {where_clause}");

        let total = sqlx::query_scalar::<_, i64>(&count)
            .bind(&filter.username)
            .bind(&filter.email)
            .bind(filter.role)
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        Ok(PaginatedUsersResponse {
            data,
            meta: PaginationMeta::new(total, &filter.pagination),
        })
    }
}
