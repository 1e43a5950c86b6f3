use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const ORDER_COLUMNS: &str = "id, user_id, book_id, quantity, unit_price, created_at";

/// A purchase record. `unit_price` is snapshotted at order time so later
/// price edits don't rewrite history. Readable by its owner or an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderDto {
    pub book_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}
