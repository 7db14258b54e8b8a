//! Language endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::language::{CreateLanguage, Language, UpdateLanguage},
};

use super::{AuthenticatedUser, PaginatedLanguages, PaginatedResponse};

#[derive(Deserialize, IntoParams)]
pub struct LanguageQuery {
    pub page: Option<i64>,
}

/// List languages
#[utoipa::path(
    get,
    path = "/languages",
    tag = "languages",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "List of languages", body = PaginatedLanguages)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<Json<PaginatedResponse<Language>>> {
    let (items, total) = state.services.catalog.list_languages(query.page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get language by ID
#[utoipa::path(
    get,
    path = "/languages/{id}",
    tag = "languages",
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 200, description = "Language detail", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn get_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Language>> {
    let language = state.services.catalog.get_language(id).await?;
    Ok(Json(language))
}

/// Create a new language
#[utoipa::path(
    post,
    path = "/languages",
    tag = "languages",
    security(("bearer_auth" = [])),
    request_body = CreateLanguage,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    let created = state.services.catalog.create_language(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a language
#[utoipa::path(
    put,
    path = "/languages/{id}",
    tag = "languages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    request_body = UpdateLanguage,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLanguage>,
) -> AppResult<Json<Language>> {
    let updated = state.services.catalog.update_language(id, data).await?;
    Ok(Json(updated))
}

/// Delete a language. Books referencing it keep existing with a null
/// language.
#[utoipa::path(
    delete,
    path = "/languages/{id}",
    tag = "languages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
