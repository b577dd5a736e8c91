//! Book (catalog entry) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::gallery::GalleryImage;
use super::pagination::PageInfo;
use super::rating::RatingEntry;
use super::review::ReviewEntry;

/// Book row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Storage key
    #[serde(skip)]
    pub id: i32,
    /// Business identifier
    pub book_id: String,
    pub name: String,
    pub author: Option<String>,
    pub quantity_total: i32,
    pub quantity_available: i32,
    /// Charge applied per day of loan
    pub charge_per_day: Decimal,
    pub published_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Search filter over the active catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSearchCriteria {
    All,
    ById(String),
    /// Case-insensitive substring match on the name
    ByName(String),
    Both { book_id: String, name: String },
}

/// Book search query parameters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Exact business identifier
    pub book_id: Option<String>,
    /// Substring of the book name
    #[validate(length(max = 512, message = "Name filter is too long"))]
    pub name: Option<String>,
    /// Page number (default: 1)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    /// Items per page (default: 10)
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: Option<i64>,
}

impl BookQuery {
    /// Build the typed filter, ignoring blank parameters
    pub fn criteria(&self) -> BookSearchCriteria {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (non_blank(&self.book_id), non_blank(&self.name)) {
            (None, None) => BookSearchCriteria::All,
            (Some(book_id), None) => BookSearchCriteria::ById(book_id),
            (None, Some(name)) => BookSearchCriteria::ByName(name),
            (Some(book_id), Some(name)) => BookSearchCriteria::Both { book_id, name },
        }
    }
}

/// One search hit with its rating/review aggregates
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchResult {
    pub book_id: String,
    pub name: String,
    pub author: Option<String>,
    pub quantity_total: i32,
    pub quantity_available: i32,
    pub charge_per_day: Decimal,
    pub published_date: Option<NaiveDate>,
    pub publish_year: Option<i32>,
    /// Path of the cover image, if any
    pub cover_image: Option<String>,
    /// Average rating, 0 when the book has none
    pub average_rating: f64,
    pub review_count: i64,
}

/// One page of search hits
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchPage {
    pub books: Vec<BookSearchResult>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}

/// Full catalog view of a book
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub cover_image: Option<String>,
    pub gallery: Vec<GalleryImage>,
    pub ratings: Vec<RatingEntry>,
    pub average_rating: f64,
    pub reviews: Vec<ReviewEntry>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 64, message = "Book ID must be 1-64 characters"))]
    pub book_id: String,
    #[validate(length(min = 1, max = 512, message = "Name must be 1-512 characters"))]
    pub name: String,
    pub author: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity_total: i32,
    #[validate(custom(function = "validate_non_negative"))]
    pub charge_per_day: Decimal,
    pub published_date: Option<NaiveDate>,
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Charge per day cannot be negative".into());
        return Err(err);
    }
    Ok(())
}
