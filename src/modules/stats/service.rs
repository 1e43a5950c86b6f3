use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{AdminStats, SellerStats};

pub struct StatsService;

impl StatsService {
    #[instrument(skip(db))]
    pub async fn seller_stats(db: &PgPool, seller_id: Uuid) -> Result<SellerStats, AppError> {
        let total_books =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE seller_id = $1")
                .bind(seller_id)
                .fetch_one(db)
                .await
                .context("Failed to count seller books")
                .map_err(AppError::database)?;

        let total_orders = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders o \
             JOIN books b ON b.id = o.book_id \
             WHERE b.seller_id = $1",
        )
        .bind(seller_id)
        .fetch_one(db)
        .await
        .context("Failed to count seller orders")
        .map_err(AppError::database)?;

        Ok(SellerStats {
            total_books,
            total_orders,
        })
    }

    #[instrument(skip(db))]
    pub async fn admin_stats(db: &PgPool) -> Result<AdminStats, AppError> {
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        let total_booksellers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'bookseller'")
                .fetch_one(db)
                .await
                .context("Failed to count booksellers")
                .map_err(AppError::database)?;

        let pending_booksellers = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = 'bookseller' AND store_status = 'pending'",
        )
        .fetch_one(db)
        .await
        .context("Failed to count pending booksellers")
        .map_err(AppError::database)?;

        let total_books = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(db)
            .await
            .context("Failed to count books")
            .map_err(AppError::database)?;

        let total_orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(db)
            .await
            .context("Failed to count orders")
            .map_err(AppError::database)?;

        Ok(AdminStats {
            total_users,
            total_booksellers,
            pending_booksellers,
            total_books,
            total_orders,
        })
    }
}
