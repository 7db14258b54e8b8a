//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, home, instances, languages, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Librarium API",
        version = "0.3.0",
        description = "Library catalog and lending tracker REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        home::summary,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_book_instances,
        books::create_book_instance,
        // Instances
        instances::list_instances,
        instances::get_instance,
        instances::update_instance,
        instances::delete_instance,
        // Loans
        loans::my_borrowed,
        loans::all_borrowed,
        loans::renew_form,
        loans::renew,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Languages
        languages::list_languages,
        languages::get_language,
        languages::create_language,
        languages::update_language,
        languages::delete_language,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetail,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Instances
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::StatusLabel,
            // Loans
            loans::RenewalProposal,
            loans::RenewRequest,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Languages
            crate::models::language::Language,
            crate::models::language::CreateLanguage,
            crate::models::language::UpdateLanguage,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            // Home
            crate::services::home::HomeSummary,
            // Health
            health::HealthResponse,
            // Pagination wrappers
            crate::api::PaginatedBooks,
            crate::api::PaginatedInstances,
            crate::api::PaginatedAuthors,
            crate::api::PaginatedGenres,
            crate::api::PaginatedLanguages,
            crate::api::PaginatedUsers,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "home", description = "Home page summary"),
        (name = "books", description = "Book catalog management"),
        (name = "instances", description = "Physical copy management"),
        (name = "loans", description = "Loan tracking and renewals"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "languages", description = "Language management"),
        (name = "users", description = "Borrower account management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
