//! Book issuance history (loans) and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{
    charges,
    error::{AppError, AppResult},
};

/// Issuance record from database. `submit_date` is null while the loan is active.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookHistory {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip)]
    pub book_id: i32,
    pub issue_date: DateTime<Utc>,
    pub submit_date: Option<DateTime<Utc>>,
    pub charges: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Borrower and stock state read under lock before issuing a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueEligibility {
    pub due_charges: Decimal,
    pub active_loans: i64,
    pub holds_same_book: bool,
    pub quantity_available: i32,
}

impl IssueEligibility {
    /// Check borrowing rules in order; the first violated rule wins
    pub fn check(&self, max_active_loans: i64) -> AppResult<()> {
        if !self.due_charges.is_zero() {
            return Err(AppError::OutstandingDueCharges(self.due_charges));
        }
        if self.active_loans >= max_active_loans {
            return Err(AppError::BookLimitExceeded {
                limit: max_active_loans,
            });
        }
        if self.holds_same_book {
            return Err(AppError::CannotIssueSameBook);
        }
        if self.quantity_available <= 0 {
            return Err(AppError::BookOutOfStock);
        }
        Ok(())
    }
}

/// Active loan located for a return, with the rate of its book
#[derive(Debug, Clone, FromRow)]
pub struct ActiveLoan {
    pub history_id: i32,
    pub book_key: i32,
    pub issue_date: DateTime<Utc>,
    pub charge_per_day: Decimal,
}

/// Issue request body (admins name the borrower)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueBookRequest {
    pub user_id: Option<i32>,
}

/// Return request body
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    pub user_id: Option<i32>,
    /// Defaults to now
    pub submit_date: Option<DateTime<Utc>>,
}

/// Outcome of a return
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceipt {
    pub history: BookHistory,
    pub used_days: i64,
    pub charges: Decimal,
    /// User's due charges after this return
    pub due_charges: Decimal,
}

/// History row joined with its book
#[derive(Debug, Clone, FromRow)]
pub struct BookHistoryRow {
    pub id: i32,
    pub book_id: String,
    pub book_name: String,
    pub charge_per_day: Decimal,
    pub issue_date: DateTime<Utc>,
    pub submit_date: Option<DateTime<Utc>>,
}

/// History entry for display; amounts are recomputed from the stored dates
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryEntry {
    pub id: i32,
    pub book_id: String,
    pub book_name: String,
    pub charge_per_day: Decimal,
    pub issue_date: DateTime<Utc>,
    pub submit_date: Option<DateTime<Utc>>,
    pub used_days: Option<i64>,
    pub total_amount: Option<Decimal>,
}

impl TryFrom<BookHistoryRow> for BookHistoryEntry {
    type Error = AppError;

    fn try_from(row: BookHistoryRow) -> AppResult<Self> {
        let charge = row
            .submit_date
            .map(|submit| charges::calculate(row.issue_date, submit, row.charge_per_day))
            .transpose()?;

        Ok(BookHistoryEntry {
            id: row.id,
            book_id: row.book_id,
            book_name: row.book_name,
            charge_per_day: row.charge_per_day,
            issue_date: row.issue_date,
            submit_date: row.submit_date,
            used_days: charge.map(|c| c.used_days),
            total_amount: charge.map(|c| c.total_amount),
        })
    }
}

/// Raw counters behind a library summary
#[derive(Debug, Clone, FromRow)]
pub struct LibrarySummaryRow {
    pub total_issued: i64,
    pub total_submitted: i64,
    pub paid_amount: Decimal,
    pub due_charges: Decimal,
}

/// Per-user borrowing summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySummary {
    pub total_issued: i64,
    pub total_submitted: i64,
    pub not_submitted: i64,
    pub paid_amount: Decimal,
    pub due_charges: Decimal,
}

impl From<LibrarySummaryRow> for LibrarySummary {
    fn from(row: LibrarySummaryRow) -> Self {
        LibrarySummary {
            total_issued: row.total_issued,
            total_submitted: row.total_submitted,
            not_submitted: row.total_issued - row.total_submitted,
            paid_amount: row.paid_amount,
            due_charges: row.due_charges,
        }
    }
}
