//! Catalog service: CRUD and list/count operations over the five entities.
//!
//! Thin orchestration over the repositories: input validation, the fixed
//! page size from configuration, and status-code parsing for filters.

use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
        book::{Book, BookDetail, BookQuery, BookShort, CreateBook, UpdateBook},
        book_instance::{
            BookInstance, BookInstanceQuery, CreateBookInstance, LoanStatus, UpdateBookInstance,
        },
        genre::{CreateGenre, Genre, UpdateGenre},
        language::{CreateLanguage, Language, UpdateLanguage},
        user::{CreateUser, User},
    },
    repository::Repository,
    services::validate_input,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Fixed page size for all list views
    pub fn page_size(&self) -> i64 {
        self.config.page_size
    }

    /// Clamp the requested page so the OFFSET arithmetic cannot overflow
    const MAX_PAGE: i64 = 1_000_000;

    fn page(requested: Option<i64>) -> i64 {
        requested.unwrap_or(1).clamp(1, Self::MAX_PAGE)
    }

    // --- Books ---

    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository
            .books
            .list(
                Self::page(query.page),
                self.config.page_size,
                query.order_by.as_deref(),
            )
            .await
    }

    pub async fn get_book_detail(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id).await
    }

    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        validate_input(&data)?;
        self.repository.books.create(&data).await
    }

    pub async fn update_book(&self, id: i32, data: UpdateBook) -> AppResult<Book> {
        validate_input(&data)?;
        self.repository.books.update(id, &data).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // --- Book instances ---

    pub async fn list_instances(
        &self,
        query: &BookInstanceQuery,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let status = match query.status.as_deref() {
            Some(code) => Some(code.parse::<LoanStatus>().map_err(|_| {
                AppError::validation("status", "Unknown status code (expected m, o, a or r)")
            })?),
            None => None,
        };

        self.repository
            .book_instances
            .list(Self::page(query.page), self.config.page_size, status)
            .await
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    pub async fn create_instance(
        &self,
        book_id: i32,
        data: CreateBookInstance,
    ) -> AppResult<BookInstance> {
        validate_input(&data)?;
        // The parent book must resolve; a dangling id would otherwise
        // surface as an opaque FK error.
        self.repository.books.get_by_id(book_id).await?;
        self.repository.book_instances.create(book_id, &data).await
    }

    pub async fn update_instance(
        &self,
        id: Uuid,
        data: UpdateBookInstance,
    ) -> AppResult<BookInstance> {
        validate_input(&data)?;
        self.repository.book_instances.update(id, &data).await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await
    }

    // --- Authors ---

    pub async fn list_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository
            .authors
            .list(
                Self::page(query.page),
                self.config.page_size,
                query.order_by.as_deref(),
            )
            .await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        validate_input(&data)?;
        self.repository.authors.create(&data).await
    }

    pub async fn update_author(&self, id: i32, data: UpdateAuthor) -> AppResult<Author> {
        validate_input(&data)?;
        self.repository.authors.update(id, &data).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // --- Genres ---

    pub async fn list_genres(&self, page: Option<i64>) -> AppResult<(Vec<Genre>, i64)> {
        self.repository
            .genres
            .list(Self::page(page), self.config.page_size)
            .await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, data: CreateGenre) -> AppResult<Genre> {
        validate_input(&data)?;
        self.repository.genres.create(&data).await
    }

    pub async fn update_genre(&self, id: i32, data: UpdateGenre) -> AppResult<Genre> {
        validate_input(&data)?;
        self.repository.genres.update(id, &data).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // --- Languages ---

    pub async fn list_languages(&self, page: Option<i64>) -> AppResult<(Vec<Language>, i64)> {
        self.repository
            .languages
            .list(Self::page(page), self.config.page_size)
            .await
    }

    pub async fn get_language(&self, id: i32) -> AppResult<Language> {
        self.repository.languages.get_by_id(id).await
    }

    pub async fn create_language(&self, data: CreateLanguage) -> AppResult<Language> {
        validate_input(&data)?;
        self.repository.languages.create(&data).await
    }

    pub async fn update_language(&self, id: i32, data: UpdateLanguage) -> AppResult<Language> {
        validate_input(&data)?;
        self.repository.languages.update(id, &data).await
    }

    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }

    // --- Borrower accounts ---

    pub async fn list_users(&self, page: Option<i64>) -> AppResult<(Vec<User>, i64)> {
        self.repository
            .users
            .list(Self::page(page), self.config.page_size)
            .await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        validate_input(&data)?;
        self.repository.users.create(&data).await
    }

    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(CatalogService::page(None), 1);
        assert_eq!(CatalogService::page(Some(0)), 1);
        assert_eq!(CatalogService::page(Some(-5)), 1);
    }

    #[test]
    fn page_is_clamped_against_offset_overflow() {
        assert_eq!(CatalogService::page(Some(i64::MAX)), CatalogService::MAX_PAGE);
        assert_eq!(CatalogService::page(Some(42)), 42);
    }
}
