//! Book model and related types.
//!
//! A `Book` is a catalog entry (title, author, ISBN); the physical copies
//! that can actually be borrowed are `BookInstance` records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::book_instance::{BookInstance, StatusLabel};
use super::genre::Genre;
use super::language::Language;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Nulled when the referenced author is deleted
    pub author_id: Option<i32>,
    pub summary: String,
    /// ISBN-13, globally unique
    pub isbn: String,
    /// Nulled when the referenced language is deleted
    pub language_id: Option<i32>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    #[sqlx(default)]
    pub author_name: Option<String>,
}

/// Full book detail: relations loaded separately, plus the set of valid
/// loan status labels for instance display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
    pub status_labels: Vec<StatusLabel>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Order by field: title or isbn
    pub order_by: Option<String>,
}
