use serde::Serialize;
use utoipa::ToSchema;

/// Counts visible to an approved bookseller, scoped to their own catalog.
#[derive(Debug, Serialize, ToSchema)]
pub struct SellerStats {
    pub total_books: i64,
    pub total_orders: i64,
}

/// System-wide counts for the admin dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_booksellers: i64,
    pub pending_booksellers: i64,
    pub total_books: i64,
    pub total_orders: i64,
}
