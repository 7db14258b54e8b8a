//! Author endpoints. Mutations are gated by distinct capabilities
//! (add_author, change_author, delete_author).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
};

use super::{AuthenticatedUser, PaginatedAuthors, PaginatedResponse};

/// List authors, default ordering (last_name, first_name)
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("order_by" = Option<String>, Query, description = "Order by field: last_name or first_name")
    ),
    responses(
        (status = 200, description = "List of authors", body = PaginatedAuthors)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let (items, total) = state.services.catalog.list_authors(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author detail", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Create a new author (requires add_author)
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing add_author capability")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    claims.require_add_author()?;

    let created = state.services.catalog.create_author(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an author (requires change_author)
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 403, description = "Missing change_author capability"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    claims.require_change_author()?;

    let updated = state.services.catalog.update_author(id, data).await?;
    Ok(Json(updated))
}

/// Delete an author (requires delete_author). Their books survive with a
/// null author; a referential failure comes back as 409 so the caller can
/// return to the confirmation view instead of crashing.
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 403, description = "Missing delete_author capability"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Delete blocked by existing references")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_delete_author()?;

    state.services.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
