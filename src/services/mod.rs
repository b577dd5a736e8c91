//! Business logic services

pub mod catalog;
pub mod issuance;
pub mod reports;
pub mod reviews;

use crate::{config::LibraryConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub issuance: issuance::IssuanceService,
    pub reports: reports::ReportsService,
    pub reviews: reviews::ReviewsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, library_config: LibraryConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            issuance: issuance::IssuanceService::new(
                repository.clone(),
                library_config.max_active_loans,
            ),
            reports: reports::ReportsService::new(
                repository.clone(),
                library_config.default_page_size,
            ),
            reviews: reviews::ReviewsService::new(repository.clone()),
            repository,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
