//! Business logic services

pub mod catalog;
pub mod home;
pub mod loans;
pub mod session;

use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub home: home::HomeService,
    pub session: session::SessionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        catalog_config: CatalogConfig,
        session_service: session::SessionService,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config.clone()),
            loans: loans::LoansService::new(repository.clone(), catalog_config),
            home: home::HomeService::new(repository, session_service.clone()),
            session: session_service,
        }
    }
}

/// Run derive-based validation and surface the first failure as a
/// field-level Validation error.
pub(crate) fn validate_input<T: Validate>(data: &T) -> AppResult<()> {
    data.validate().map_err(|errors| {
        let (field, field_errors) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(f, e)| (f.to_string(), e.to_vec()))
            .unwrap_or_else(|| ("input".to_string(), Vec::new()));

        let message = field_errors
            .first()
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());

        AppError::Validation { field, message }
    })
}
