//! Book review methods on Repository

use chrono::Utc;

use super::Repository;
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        pagination::Pagination,
        review::{BookReview, ReviewEntry},
    },
};

const REVIEW_UNIQUE: &str = "uq_book_reviews_user_book";

const REVIEW_ENTRY_COLUMNS: &str = r#"
    rv.id, rv.book_id, rv.user_id,
    NULLIF(TRIM(CONCAT_WS(' ', u.first_name, u.last_name)), '') AS reviewer_name,
    rv.review, rv.created_at
"#;

impl Repository {
    pub async fn reviews_exists(&self, user_id: i32, book_key: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_reviews WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a review. A concurrent duplicate surfaces as `ReviewAlreadyExist`.
    pub async fn reviews_create(&self, user_id: i32, book_key: i32, review: &str) -> AppResult<BookReview> {
        sqlx::query_as::<_, BookReview>(
            r#"
            INSERT INTO book_reviews (user_id, book_id, review, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_key)
        .bind(review)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, REVIEW_UNIQUE) {
                AppError::ReviewAlreadyExist
            } else {
                e.into()
            }
        })
    }

    pub async fn reviews_count_for_book(&self, book_key: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_reviews WHERE book_id = $1")
            .bind(book_key)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// One page of a book's reviews, newest first
    pub async fn reviews_page_for_book(
        &self,
        book_key: i32,
        pagination: &Pagination,
    ) -> AppResult<Vec<ReviewEntry>> {
        let query = format!(
            r#"
            SELECT {}
            FROM book_reviews rv
            JOIN users u ON u.id = rv.user_id
            WHERE rv.book_id = $1
            ORDER BY rv.created_at DESC, rv.id DESC
            LIMIT $2 OFFSET $3
            "#,
            REVIEW_ENTRY_COLUMNS
        );

        let rows = sqlx::query_as::<_, ReviewEntry>(&query)
            .bind(book_key)
            .bind(pagination.page_size)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All reviews of several books, newest first
    pub async fn reviews_for_books(&self, book_keys: &[i32]) -> AppResult<Vec<ReviewEntry>> {
        let query = format!(
            r#"
            SELECT {}
            FROM book_reviews rv
            JOIN users u ON u.id = rv.user_id
            WHERE rv.book_id = ANY($1)
            ORDER BY rv.created_at DESC, rv.id DESC
            "#,
            REVIEW_ENTRY_COLUMNS
        );

        let rows = sqlx::query_as::<_, ReviewEntry>(&query)
            .bind(book_keys)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
