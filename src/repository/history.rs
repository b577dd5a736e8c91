//! Issuance history methods on Repository: issue, return and per-user listing.
//!
//! Issue and return each run in a single transaction that locks the user row
//! and then the book row, always in that order. Rules are checked on the
//! locked rows, so concurrent requests for the same user or book serialize,
//! and any early return drops the transaction without partial effect.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::Repository;
use crate::{
    charges,
    error::{is_unique_violation, AppError, AppResult},
    models::{
        book::Book,
        history::{ActiveLoan, BookHistory, BookHistoryRow, IssueEligibility, ReturnReceipt},
        user::User,
    },
};

const ACTIVE_LOAN_UNIQUE: &str = "uq_book_history_active_loan";

impl Repository {
    /// Issue one copy of `book_id` (business ID) to `user_id` at `now`
    pub async fn history_issue(
        &self,
        user_id: i32,
        book_id: &str,
        now: DateTime<Utc>,
        max_active_loans: i64,
    ) -> AppResult<BookHistory> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::UserNotFound)?;

        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE book_id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::BookNotFound)?;

        let (active_loans, holds_same_book): (i64, bool) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(BOOL_OR(book_id = $2), FALSE)
            FROM book_history
            WHERE user_id = $1 AND submit_date IS NULL
            "#,
        )
        .bind(user.id)
        .bind(book.id)
        .fetch_one(&mut *tx)
        .await?;

        IssueEligibility {
            due_charges: user.due_charges,
            active_loans,
            holds_same_book,
            quantity_available: book.quantity_available,
        }
        .check(max_active_loans)?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET quantity_available = quantity_available - 1, updated_at = $2
            WHERE id = $1 AND quantity_available > 0
            "#,
        )
        .bind(book.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookOutOfStock);
        }

        let history = sqlx::query_as::<_, BookHistory>(
            r#"
            INSERT INTO book_history (user_id, book_id, issue_date, created_at)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(book.id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, ACTIVE_LOAN_UNIQUE) {
                AppError::CannotIssueSameBook
            } else {
                e.into()
            }
        })?;

        tx.commit().await?;

        Ok(history)
    }

    /// Close the active loan of `book_id` (business ID) held by `user_id`,
    /// bill it and add the charge to the user's dues
    pub async fn history_return(
        &self,
        user_id: i32,
        book_id: &str,
        submit_date: DateTime<Utc>,
    ) -> AppResult<ReturnReceipt> {
        let mut tx = self.pool.begin().await?;

        // Lock the user first to keep the issue lock order
        sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::BookNotIssued)?;

        let loan = sqlx::query_as::<_, ActiveLoan>(
            r#"
            SELECT h.id AS history_id, b.id AS book_key, h.issue_date, b.charge_per_day
            FROM book_history h
            JOIN books b ON b.id = h.book_id
            WHERE h.user_id = $1 AND b.book_id = $2 AND h.submit_date IS NULL
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::BookNotIssued)?;

        if submit_date < loan.issue_date {
            return Err(AppError::SubmitDateInvalid);
        }

        let charge = charges::calculate(loan.issue_date, submit_date, loan.charge_per_day)?;

        let history = sqlx::query_as::<_, BookHistory>(
            r#"
            UPDATE book_history
            SET submit_date = $2, charges = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(loan.history_id)
        .bind(submit_date)
        .bind(charge.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET quantity_available = quantity_available + 1, updated_at = NOW()
            WHERE id = $1 AND quantity_available < quantity_total
            "#,
        )
        .bind(loan.book_key)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Internal(format!(
                "Stock of book {} is already full on return",
                book_id
            )));
        }

        let due_charges: Decimal = sqlx::query_scalar(
            r#"
            UPDATE users
            SET due_charges = due_charges + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING due_charges
            "#,
        )
        .bind(user_id)
        .bind(charge.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReturnReceipt {
            history,
            used_days: charge.used_days,
            charges: charge.total_amount,
            due_charges,
        })
    }

    /// All history rows of a user joined with their book, newest first
    pub async fn history_for_user(&self, user_id: i32) -> AppResult<Vec<BookHistoryRow>> {
        let rows = sqlx::query_as::<_, BookHistoryRow>(
            r#"
            SELECT h.id, b.book_id, b.name AS book_name, b.charge_per_day,
                   h.issue_date, h.submit_date
            FROM book_history h
            JOIN books b ON b.id = h.book_id
            WHERE h.user_id = $1
            ORDER BY h.issue_date DESC, h.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
