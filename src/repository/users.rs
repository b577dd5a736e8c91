//! User domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        history::{LibrarySummary, LibrarySummaryRow},
        user::User,
    },
};

impl Repository {
    /// Get a non-deleted user by email
    pub async fn users_get_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)
    }

    /// Issued/submitted counters and balances for a user
    pub async fn users_library_summary(&self, user_id: i32) -> AppResult<LibrarySummary> {
        let row = sqlx::query_as::<_, LibrarySummaryRow>(
            r#"
            SELECT u.paid_amount, u.due_charges,
                   (SELECT COUNT(*) FROM book_history h WHERE h.user_id = u.id) AS total_issued,
                   (SELECT COUNT(*) FROM book_history h
                    WHERE h.user_id = u.id AND h.submit_date IS NOT NULL) AS total_submitted
            FROM users u
            WHERE u.id = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(row.into())
    }
}
