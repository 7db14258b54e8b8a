//! Book instance (physical copy) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceQuery, UpdateBookInstance},
};

use super::{AuthenticatedUser, PaginatedInstances, PaginatedResponse};

/// List instances with an optional exact status filter
#[utoipa::path(
    get,
    path = "/instances",
    tag = "instances",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("status" = Option<String>, Query, description = "Filter by status code (m, o, a, r)")
    ),
    responses(
        (status = 200, description = "List of instances", body = PaginatedInstances),
        (status = 400, description = "Unknown status code")
    )
)]
pub async fn list_instances(
    State(state): State<crate::AppState>,
    Query(query): Query<BookInstanceQuery>,
) -> AppResult<Json<PaginatedResponse<BookInstance>>> {
    let (items, total) = state.services.catalog.list_instances(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get instance by ID
#[utoipa::path(
    get,
    path = "/instances/{id}",
    tag = "instances",
    params(
        ("id" = Uuid, Path, description = "Instance ID")
    ),
    responses(
        (status = 200, description = "Instance detail", body = BookInstance),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.get_instance(id).await?;
    Ok(Json(instance))
}

/// Update an instance (administrative: any status can be set)
#[utoipa::path(
    put,
    path = "/instances/{id}",
    tag = "instances",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Instance ID")
    ),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Instance updated", body = BookInstance),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    let updated = state.services.catalog.update_instance(id, data).await?;
    Ok(Json(updated))
}

/// Delete an instance
#[utoipa::path(
    delete,
    path = "/instances/{id}",
    tag = "instances",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Instance ID")
    ),
    responses(
        (status = 204, description = "Instance deleted"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn delete_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_instance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
