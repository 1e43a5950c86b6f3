use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A (user, book) pair. The pair is unique; attempting to add it twice is a
/// 409, removing a missing pair is a 404 — never a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A favorite joined with the book it points at, for listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FavoriteWithBook {
    pub id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    pub author: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFavoriteDto {
    pub book_id: Uuid,
}
