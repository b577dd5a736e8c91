//! Book issue and return service

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::history::{BookHistory, ReturnReceipt},
    repository::Repository,
};

#[derive(Clone)]
pub struct IssuanceService {
    repository: Repository,
    max_active_loans: i64,
}

impl IssuanceService {
    pub fn new(repository: Repository, max_active_loans: i64) -> Self {
        Self {
            repository,
            max_active_loans,
        }
    }

    /// Issue a book to a user
    pub async fn issue_book(&self, user_id: i32, book_id: &str) -> AppResult<BookHistory> {
        let history = self
            .repository
            .history_issue(user_id, book_id, Utc::now(), self.max_active_loans)
            .await?;

        tracing::info!(
            "Issued book {} to user {} (history id={})",
            book_id, user_id, history.id
        );
        Ok(history)
    }

    /// Return a book; `submit_date` defaults to now
    pub async fn return_book(
        &self,
        user_id: i32,
        book_id: &str,
        submit_date: Option<DateTime<Utc>>,
    ) -> AppResult<ReturnReceipt> {
        let submit_date = submit_date.unwrap_or_else(Utc::now);
        let receipt = self
            .repository
            .history_return(user_id, book_id, submit_date)
            .await?;

        tracing::info!(
            "User {} returned book {} after {} day(s), charged {} (due now {})",
            user_id, book_id, receipt.used_days, receipt.charges, receipt.due_charges
        );
        Ok(receipt)
    }
}
