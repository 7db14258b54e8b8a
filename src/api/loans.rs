//! Loan workflow endpoints: borrowed-book lists and renewals

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::BookInstance,
};

use super::AuthenticatedUser;

/// Renewal form state: the instance and a suggested due date
#[derive(Serialize, ToSchema)]
pub struct RenewalProposal {
    pub instance: BookInstance,
    /// Pre-filled due date (today + configured renewal period)
    pub renewal_date: NaiveDate,
}

/// Renew request. The date is a plain string so a malformed value can be
/// reported as a field-level validation error instead of a decode failure.
#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    pub renewal_date: Option<String>,
}

impl RenewRequest {
    fn parse_date(&self) -> AppResult<NaiveDate> {
        let raw = self
            .renewal_date
            .as_deref()
            .ok_or_else(|| AppError::validation("renewal_date", "Renewal date is required"))?;

        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::validation("renewal_date", "Invalid date (expected YYYY-MM-DD)")
        })
    }
}

/// Books on loan to the current user, earliest due first
#[utoipa::path(
    get,
    path = "/loans/my",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Instances borrowed by the current user", body = Vec<BookInstance>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookInstance>>> {
    let instances = state.services.loans.borrowed_by_user(claims.user_id).await?;
    Ok(Json(instances))
}

/// All books on loan, for librarians
#[utoipa::path(
    get,
    path = "/loans/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All on-loan instances", body = Vec<BookInstance>),
        (status = 403, description = "Missing mark_returned capability")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookInstance>>> {
    claims.require_mark_returned()?;

    let instances = state.services.loans.all_on_loan().await?;
    Ok(Json(instances))
}

/// Renewal form: the instance plus a suggested due date
#[utoipa::path(
    get,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Instance ID")
    ),
    responses(
        (status = 200, description = "Renewal proposal", body = RenewalProposal),
        (status = 403, description = "Missing mark_returned capability"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn renew_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalProposal>> {
    claims.require_mark_returned()?;

    let instance = state.services.catalog.get_instance(id).await?;
    let renewal_date = state.services.loans.proposed_renewal_date();

    Ok(Json(RenewalProposal {
        instance,
        renewal_date,
    }))
}

/// Renew a loan: set the instance's due date
#[utoipa::path(
    post,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Instance ID")
    ),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Loan renewed", body = BookInstance),
        (status = 400, description = "Missing or malformed renewal date"),
        (status = 403, description = "Missing mark_returned capability"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn renew(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<BookInstance>> {
    claims.require_mark_returned()?;

    let new_due_date = request.parse_date()?;
    let instance = state.services.loans.renew(id, new_due_date).await?;
    Ok(Json(instance))
}
