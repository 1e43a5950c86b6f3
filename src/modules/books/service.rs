use anyhow::Context;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::Principal;
use crate::middleware::role::check_owner;
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    BOOK_COLUMNS, Book, BookFilterParams, BookProvenance, CreateBookDto, PaginatedBooksResponse,
    UpdateBookDto,
};

pub struct BookService;

impl BookService {
    fn validate_price(price: Decimal) -> Result<(), AppError> {
        if price.is_sign_negative() {
            return Err(AppError::unprocessable("price must not be negative"));
        }
        Ok(())
    }

    fn validate_stock(stock: i32) -> Result<(), AppError> {
        if stock < 0 {
            return Err(AppError::unprocessable("stock must not be negative"));
        }
        Ok(())
    }

    /// Owner-or-admin rule for book mutation. The response body carries the
    /// `bookOwner` flag so clients can distinguish an ownership denial from a
    /// role denial.
    fn ensure_book_owner(principal: &Principal, book: &Book) -> Result<(), AppError> {
        check_owner(principal, book.seller_id).map_err(|_| {
            AppError::forbidden("You are not the owner of this book")
                .with_details(json!({"bookOwner": false}))
        })
    }

    #[instrument(skip_all, fields(seller = %principal.id))]
    pub async fn create_book(
        db: &PgPool,
        principal: &Principal,
        dto: CreateBookDto,
    ) -> Result<Book, AppError> {
        Self::validate_price(dto.price)?;
        let stock = dto.stock.unwrap_or(0);
        Self::validate_stock(stock)?;

        // Caller already passed the publish gate; this tag only records who
        // added the book.
        let added_by = match principal.role {
            Role::Admin => BookProvenance::Admin,
            Role::Bookseller => BookProvenance::Bookseller,
            Role::User => return Err(AppError::forbidden("Bookseller account required")),
        };

        let insert = format!(
            "INSERT INTO books (title, author, description, price, stock, seller_id, added_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {BOOK_COLUMNS}"
        );

        sqlx::query_as::<_, Book>(&insert)
            .bind(dto.title.trim())
            .bind(dto.author.trim())
            .bind(&dto.description)
            .bind(dto.price)
            .bind(stock)
            .bind(principal.id)
            .bind(added_by)
            .fetch_one(db)
            .await
            .context("Failed to insert book")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_book(db: &PgPool, id: Uuid) -> Result<Book, AppError> {
        let select = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");

        sqlx::query_as::<_, Book>(&select)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch book")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    #[instrument(skip(db, filter))]
    pub async fn list_books(
        db: &PgPool,
        filter: BookFilterParams,
    ) -> Result<PaginatedBooksResponse, AppError> {
        let where_clause = "WHERE ($1::TEXT IS NULL OR title ILIKE '%' || $1 || '%') \
               AND ($2::TEXT IS NULL OR author ILIKE '%' || $2 || '%') \
               AND ($3::UUID IS NULL OR seller_id = $3)";

        let select = format!(
            "SELECT {BOOK_COLUMNS} FROM books {where_clause} \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        );

        let data = sqlx::query_as::<_, Book>(&select)
            .bind(&filter.title)
            .bind(&filter.author)
            .bind(filter.seller_id)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to list books")
            .map_err(AppError::database)?;

        let count = format!("SELECT COUNT(*) FROM books {where_clause}");

        let total = sqlx::query_scalar::<_, i64>(&count)
            .bind(&filter.title)
            .bind(&filter.author)
            .bind(filter.seller_id)
            .fetch_one(db)
            .await
            .context("Failed to count books")
            .map_err(AppError::database)?;

        Ok(PaginatedBooksResponse {
            data,
            meta: PaginationMeta::new(total, &filter.pagination),
        })
    }

    #[instrument(skip_all, fields(book_id = %id))]
    pub async fn update_book(
        db: &PgPool,
        principal: &Principal,
        id: Uuid,
        dto: UpdateBookDto,
    ) -> Result<Book, AppError> {
        let book = Self::get_book(db, id).await?;
        Self::ensure_book_owner(principal, &book)?;

        if let Some(price) = dto.price {
            Self::validate_price(price)?;
        }
        if let Some(stock) = dto.stock {
            Self::validate_stock(stock)?;
        }

        let update = format!(
            "UPDATE books SET \
                 title = COALESCE($2, title), \
                 author = COALESCE($3, author), \
                 description = COALESCE($4, description), \
                 price = COALESCE($5, price), \
                 stock = COALESCE($6, stock), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {BOOK_COLUMNS}"
        );

        sqlx::query_as::<_, Book>(&update)
            .bind(id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.author.as_deref().map(str::trim))
            .bind(&dto.description)
            .bind(dto.price)
            .bind(dto.stock)
            .fetch_one(db)
            .await
            .context("Failed to update book")
            .map_err(AppError::database)
    }

    #[instrument(skip_all, fields(book_id = %id))]
    pub async fn delete_book(
        db: &PgPool,
        principal: &Principal,
        id: Uuid,
    ) -> Result<(), AppError> {
        let book = Self::get_book(db, id).await?;
        Self::ensure_book_owner(principal, &book)?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete book")
            .map_err(AppError::database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price_rejects_negative() {
        assert!(BookService::validate_price(Decimal::new(-100, 2)).is_err());
        assert!(BookService::validate_price(Decimal::ZERO).is_ok());
        assert!(BookService::validate_price(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_validate_stock_rejects_negative() {
        assert!(BookService::validate_stock(-1).is_err());
        assert!(BookService::validate_stock(0).is_ok());
        assert!(BookService::validate_stock(12).is_ok());
    }

    #[test]
    fn test_ensure_book_owner_flags_response() {
        let principal = Principal {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            role: Role::Bookseller,
        };
        let book = Book {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            author: "author".to_string(),
            description: None,
            price: Decimal::new(1000, 2),
            stock: 1,
            seller_id: Uuid::new_v4(),
            added_by: BookProvenance::Bookseller,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let err = BookService::ensure_book_owner(&principal, &book).unwrap_err();
        assert_eq!(err.details, Some(json!({"bookOwner": false})));
    }
}
