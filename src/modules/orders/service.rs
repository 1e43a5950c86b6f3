use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Principal;
use crate::middleware::role::check_owner;
use crate::modules::books::service::BookService;
use crate::utils::errors::AppError;

use super::model::{CreateOrderDto, ORDER_COLUMNS, Order};

pub struct OrderService;

impl OrderService {
    #[instrument(skip_all, fields(buyer = %user_id))]
    pub async fn create_order(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateOrderDto,
    ) -> Result<Order, AppError> {
        let book = BookService::get_book(db, dto.book_id).await?;

        let insert = format!(
            "INSERT INTO orders (user_id, book_id, quantity, unit_price) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ORDER_COLUMNS}"
        );

        sqlx::query_as::<_, Order>(&insert)
            .bind(user_id)
            .bind(book.id)
            .bind(dto.quantity)
            .bind(book.price)
            .fetch_one(db)
            .await
            .context("Failed to insert order")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_own(db: &PgPool, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let select = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Order>(&select)
            .bind(user_id)
            .fetch_all(db)
            .await
            .context("Failed to list orders")
            .map_err(AppError::database)
    }

    /// Loads a single order; only the buyer or an admin may read it.
    #[instrument(skip_all, fields(order_id = %id))]
    pub async fn get_order(
        db: &PgPool,
        principal: &Principal,
        id: Uuid,
    ) -> Result<Order, AppError> {
        let select = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        let order = sqlx::query_as::<_, Order>(&select)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch order")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        check_owner(principal, order.user_id)?;

        Ok(order)
    }
}
