//! Loan workflow service: renewals, borrowed-book lists, overdue logic.
//!
//! Capability checks happen at the API layer as explicit guards on the
//! claims; the service assumes the caller is already authorized.

use chrono::{Duration, Local, NaiveDate};
use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::book_instance::BookInstance,
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: CatalogConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Suggested due date for a renewal form: today plus the configured
    /// renewal period (default 3 weeks).
    pub fn proposed_renewal_date(&self) -> NaiveDate {
        Local::now().date_naive() + Duration::weeks(self.config.renewal_weeks)
    }

    /// Set a new due date on an instance. The date is taken as supplied;
    /// there is no check that it lies in the future.
    pub async fn renew(&self, instance_id: Uuid, new_due_date: NaiveDate) -> AppResult<BookInstance> {
        let instance = self
            .repository
            .book_instances
            .renew(instance_id, new_due_date)
            .await?;

        tracing::info!(
            instance_id = %instance_id,
            due_back = %new_due_date,
            "Loan renewed"
        );

        Ok(instance)
    }

    /// Instances on loan to a user, earliest due date first
    pub async fn borrowed_by_user(&self, user_id: i32) -> AppResult<Vec<BookInstance>> {
        self.repository
            .book_instances
            .list_borrowed_by_user(user_id)
            .await
    }

    /// All instances currently on loan, earliest due date first
    pub async fn all_on_loan(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.book_instances.list_all_on_loan().await
    }
}
