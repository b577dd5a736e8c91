//! Page parameters and page metadata shared by paginated listings

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page request query parameters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    /// Items per page (default: 10)
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: Option<i64>,
}

/// Resolved page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_page_size: i64) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(default_page_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.page_size - 1) / self.page_size
    }

    /// Validate the requested page against `total` rows.
    ///
    /// Callers reject an empty result with their own not-found error before
    /// calling this, so `total` is expected to be positive here.
    pub fn check(&self, total: i64) -> AppResult<PageInfo> {
        let total_pages = self.total_pages(total);
        if self.page > total_pages {
            return Err(AppError::InvalidPageNumber {
                page: self.page,
                total_pages,
            });
        }
        Ok(PageInfo {
            page: self.page,
            page_size: self.page_size,
            total_pages,
            total,
        })
    }
}

/// Page metadata returned with every paginated response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    /// Total number of matching rows
    pub total: i64,
}
