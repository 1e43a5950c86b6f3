use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Favorite, FavoriteWithBook};

pub struct FavoriteService;

impl FavoriteService {
    /// Adds a book to the caller's favorites. The duplicate-pair rule is
    /// enforced by the unique constraint, not a read-then-write, so two
    /// concurrent adds still surface exactly one conflict.
    #[instrument(skip(db))]
    pub async fn add(db: &PgPool, user_id: Uuid, book_id: Uuid) -> Result<Favorite, AppError> {
        let book_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE id = $1")
            .bind(book_id)
            .fetch_one(db)
            .await
            .context("Failed to check book existence")
            .map_err(AppError::database)?;

        if book_exists == 0 {
            return Err(AppError::not_found("Book not found"));
        }

        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, book_id) VALUES ($1, $2) \
             RETURNING id, user_id, book_id, created_at",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Book is already in favorites")
            }
            other => {
                AppError::database(anyhow::Error::new(other).context("Failed to insert favorite"))
            }
        })
    }

    /// Removes a favorite pair; surfacing the missing pair keeps remove
    /// observable rather than silently idempotent.
    #[instrument(skip(db))]
    pub async fn remove(db: &PgPool, user_id: Uuid, book_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(db)
            .await
            .context("Failed to delete favorite")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Favorite not found"));
        }

        Ok(())
    }

    /// Lists the caller's own favorites. Scoping by the principal's id is the
    /// only access rule here; there is no cross-user view.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, user_id: Uuid) -> Result<Vec<FavoriteWithBook>, AppError> {
        sqlx::query_as::<_, FavoriteWithBook>(
            "SELECT f.id, f.book_id, b.title, b.author, b.price, f.created_at \
             FROM favorites f \
             JOIN books b ON b.id = f.book_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to list favorites")
        .map_err(AppError::database)
    }
}
