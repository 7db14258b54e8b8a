//! Book (catalog entry) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetail, BookQuery, BookShort, CreateBook, UpdateBook},
        book_instance::{BookInstance, CreateBookInstance},
    },
};

use super::{AuthenticatedUser, PaginatedBooks, PaginatedResponse};

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("order_by" = Option<String>, Query, description = "Order by field: title or isbn")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedBooks)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let (items, total) = state.services.catalog.list_books(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get book detail: the book, its instances and the valid status labels
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let detail = state.services.catalog.get_book_detail(id).await?;
    Ok(Json(detail))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update_book(id, data).await?;
    Ok(Json(updated))
}

/// Delete a book. Fails while instances still reference it.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still has instances")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List instances of a book
#[utoipa::path(
    get,
    path = "/books/{id}/instances",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Instances of the book", body = Vec<BookInstance>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BookInstance>>> {
    let detail = state.services.catalog.get_book_detail(id).await?;
    Ok(Json(detail.instances))
}

/// Create an instance for a book. Status defaults to Maintenance.
#[utoipa::path(
    post,
    path = "/books/{id}/instances",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Instance created", body = BookInstance),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_book_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    let created = state.services.catalog.create_instance(id, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
