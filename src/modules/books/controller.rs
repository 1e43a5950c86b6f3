use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_can_publish;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    Book, BookFilterParams, CreateBookDto, PaginatedBooksResponse, UpdateBookDto,
};
use super::service::BookService;

/// Browse the catalog
#[utoipa::path(
    get,
    path = "/api/books",
    params(
        ("title" = Option<String>, Query, description = "Filter by title substring"),
        ("author" = Option<String>, Query, description = "Filter by author substring"),
        ("seller_id" = Option<Uuid>, Query, description = "Filter by seller"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Paginated books", body = PaginatedBooksResponse)
    ),
    tag = "Books"
)]
#[instrument(skip_all)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilterParams>,
) -> Result<Json<PaginatedBooksResponse>, AppError> {
    let books = BookService::list_books(&state.db, filter).await?;
    Ok(Json(books))
}

/// Get a single book
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip_all, fields(book_id = %id))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::get_book(&state.db, id).await?;
    Ok(Json(book))
}

/// Publish a book (approved booksellers and admins)
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 403, description = "Not an approved bookseller or admin", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip_all)]
pub async fn create_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    ensure_can_publish(&state.db, &auth_user.0).await?;

    let book = BookService::create_book(&state.db, &auth_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book (owner or admin)
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 403, description = "Not the owner of this book", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip_all, fields(book_id = %id))]
pub async fn update_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::update_book(&state.db, &auth_user.0, id, dto).await?;
    Ok(Json(book))
}

/// Delete a book (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 403, description = "Not the owner of this book", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip_all, fields(book_id = %id))]
pub async fn delete_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    BookService::delete_book(&state.db, &auth_user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
