//! Book rating methods on Repository

use chrono::Utc;

use super::Repository;
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::rating::{BookRating, RatingEntry},
};

const RATING_UNIQUE: &str = "uq_book_ratings_user_book";

impl Repository {
    pub async fn ratings_exists(&self, user_id: i32, book_key: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_ratings WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a rating. A concurrent duplicate surfaces as `RatingAlreadyExist`.
    pub async fn ratings_create(&self, user_id: i32, book_key: i32, rating: i16) -> AppResult<BookRating> {
        sqlx::query_as::<_, BookRating>(
            r#"
            INSERT INTO book_ratings (user_id, book_id, rating, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_key)
        .bind(rating)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, RATING_UNIQUE) {
                AppError::RatingAlreadyExist
            } else {
                e.into()
            }
        })
    }

    /// Number of ratings and their average (0 when none) for a book
    pub async fn ratings_aggregate(&self, book_key: i32) -> AppResult<(i64, f64)> {
        let row: (i64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(AVG(rating)::float8, 0)::float8
            FROM book_ratings
            WHERE book_id = $1
            "#,
        )
        .bind(book_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Raw ratings of several books
    pub async fn ratings_for_books(&self, book_keys: &[i32]) -> AppResult<Vec<RatingEntry>> {
        let rows = sqlx::query_as::<_, RatingEntry>(
            r#"
            SELECT book_id, user_id, rating, created_at
            FROM book_ratings
            WHERE book_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(book_keys)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
