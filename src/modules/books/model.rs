use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_optional_uuid;

/// Which kind of account published a book. Recorded at creation and kept as
/// provenance even if the seller's role later changes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "book_provenance", rename_all = "lowercase")]
pub enum BookProvenance {
    Admin,
    Bookseller,
}

pub const BOOK_COLUMNS: &str =
    "id, title, author, description, price, stock, seller_id, added_by, created_at, updated_at";

/// A catalog entry. `seller_id` is the owning identity; mutation is limited
/// to that seller or an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock: i32,
    pub seller_id: Uuid,
    pub added_by: BookProvenance,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub author: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

/// Query parameters for the public catalog listing. Substring matching only;
/// there is deliberately no relevance ranking here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookFilterParams {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub seller_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedBooksResponse {
    pub data: Vec<Book>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
