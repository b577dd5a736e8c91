//! Book rating model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRating {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip)]
    pub book_id: i32,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Rating as listed in the book details
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    #[serde(skip)]
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddRating {
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

/// Rating aggregate for one book
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingsSummary {
    pub book_id: String,
    pub total_ratings: i64,
    pub average_rating: f64,
}

/// Average of `ratings`, 0 when there are none
pub fn average_rating(ratings: &[RatingEntry]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| r.rating as i64).sum();
    sum as f64 / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rating: i16) -> RatingEntry {
        RatingEntry {
            book_id: 1,
            user_id: 1,
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average_rating(&[entry(4), entry(5), entry(3)]), 4.0);
        assert_eq!(average_rating(&[entry(1), entry(2)]), 1.5);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(AddRating { rating: MIN_RATING }.validate().is_ok());
        assert!(AddRating { rating: MAX_RATING }.validate().is_ok());
        assert!(AddRating { rating: 0 }.validate().is_err());
        assert!(AddRating { rating: 6 }.validate().is_err());
    }
}
