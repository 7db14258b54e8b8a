//! Home summary service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book_instance::LoanStatus,
    repository::Repository,
    services::session::SessionService,
};

/// Aggregate counts for the landing view
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeSummary {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    /// Number of times this session has requested the summary
    pub num_visits: i64,
}

#[derive(Clone)]
pub struct HomeService {
    repository: Repository,
    session: SessionService,
}

impl HomeService {
    pub fn new(repository: Repository, session: SessionService) -> Self {
        Self {
            repository,
            session,
        }
    }

    /// Collect catalog counts and bump the per-session visit counter
    pub async fn summary(&self, session_id: &str) -> AppResult<HomeSummary> {
        let num_books = self.repository.books.count().await?;
        let num_instances = self.repository.book_instances.count().await?;
        let num_instances_available = self
            .repository
            .book_instances
            .count_by_status(LoanStatus::Available)
            .await?;
        let num_authors = self.repository.authors.count().await?;
        let num_visits = self.session.increment_visits(session_id).await?;

        Ok(HomeSummary {
            num_books,
            num_instances,
            num_instances_available,
            num_authors,
            num_visits,
        })
    }
}
