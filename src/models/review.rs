//! Book review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::pagination::PageInfo;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookReview {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip)]
    pub book_id: i32,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// Review joined with its author's name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub id: i32,
    #[serde(skip)]
    pub book_id: i32,
    pub user_id: i32,
    pub reviewer_name: Option<String>,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddReview {
    #[validate(length(min = 1, max = 2000, message = "Review must be 1-2000 characters"))]
    pub review: String,
}

/// One page of a book's reviews
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsSummary {
    pub book_id: String,
    pub reviews: Vec<ReviewEntry>,
    #[serde(flatten)]
    pub pagination: PageInfo,
}
