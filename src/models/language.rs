//! Language model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Natural language a book is written in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create language request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLanguage {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

/// Update language request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLanguage {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}
