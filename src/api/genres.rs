//! Genre endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre, UpdateGenre},
};

use super::{AuthenticatedUser, PaginatedGenres, PaginatedResponse};

#[derive(Deserialize, IntoParams)]
pub struct GenreQuery {
    pub page: Option<i64>,
}

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "List of genres", body = PaginatedGenres)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    Query(query): Query<GenreQuery>,
) -> AppResult<Json<PaginatedResponse<Genre>>> {
    let (items, total) = state.services.catalog.list_genres(query.page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre detail", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.get_genre(id).await?;
    Ok(Json(genre))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let created = state.services.catalog.create_genre(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    let updated = state.services.catalog.update_genre(id, data).await?;
    Ok(Json(updated))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
