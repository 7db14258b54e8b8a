//! API handlers for Librarium REST endpoints

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;
pub mod instances;
pub mod languages;
pub mod loans;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{
        author::Author, book::BookShort, book_instance::BookInstance, genre::Genre,
        language::Language, user::User, user::UserClaims,
    },
    AppState,
};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[aliases(
    PaginatedBooks = PaginatedResponse<BookShort>,
    PaginatedInstances = PaginatedResponse<BookInstance>,
    PaginatedAuthors = PaginatedResponse<Author>,
    PaginatedGenres = PaginatedResponse<Genre>,
    PaginatedLanguages = PaginatedResponse<Language>,
    PaginatedUsers = PaginatedResponse<User>
)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
