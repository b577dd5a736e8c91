//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error kinds returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    StoreError = 3,
    UserNotFound = 4,
    BookNotFound = 5,
    BookOutOfStock = 6,
    BookLimitExceeded = 7,
    CannotIssueSameBook = 8,
    OutstandingDueCharges = 9,
    BookNotIssued = 10,
    SubmitDateInvalid = 11,
    InvalidDateRange = 12,
    ReviewAlreadyExist = 13,
    RatingAlreadyExist = 14,
    BookHistoryNotFound = 15,
    InvalidPageNumber = 16,
    NoRatingsFound = 17,
    NoReviewsFound = 18,
    ErrorCountingBooks = 19,
    BadValue = 20,
    Duplicate = 21,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Book not found")]
    BookNotFound,

    #[error("Book is out of stock")]
    BookOutOfStock,

    #[error("Maximum number of issued books reached ({limit})")]
    BookLimitExceeded { limit: i64 },

    #[error("This book is already issued to the user")]
    CannotIssueSameBook,

    #[error("Outstanding due charges of {0} must be cleared before issuing books")]
    OutstandingDueCharges(Decimal),

    #[error("This book is not issued to the user")]
    BookNotIssued,

    #[error("Submit date cannot be earlier than the issue date")]
    SubmitDateInvalid,

    #[error("End date is earlier than start date")]
    InvalidDateRange,

    #[error("Review already exists for this book")]
    ReviewAlreadyExist,

    #[error("Rating already exists for this book")]
    RatingAlreadyExist,

    #[error("No book history found")]
    BookHistoryNotFound,

    #[error("Invalid page number {page} (total pages: {total_pages})")]
    InvalidPageNumber { page: i64, total_pages: i64 },

    #[error("No ratings found for this book")]
    NoRatingsFound,

    #[error("No reviews found for this book")]
    NoReviewsFound,

    #[error("No books available in the catalog")]
    ErrorCountingBooks,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable kind of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) | AppError::Authorization(_) => ErrorCode::NotAuthorized,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::UserNotFound => ErrorCode::UserNotFound,
            AppError::BookNotFound => ErrorCode::BookNotFound,
            AppError::BookOutOfStock => ErrorCode::BookOutOfStock,
            AppError::BookLimitExceeded { .. } => ErrorCode::BookLimitExceeded,
            AppError::CannotIssueSameBook => ErrorCode::CannotIssueSameBook,
            AppError::OutstandingDueCharges(_) => ErrorCode::OutstandingDueCharges,
            AppError::BookNotIssued => ErrorCode::BookNotIssued,
            AppError::SubmitDateInvalid => ErrorCode::SubmitDateInvalid,
            AppError::InvalidDateRange => ErrorCode::InvalidDateRange,
            AppError::ReviewAlreadyExist => ErrorCode::ReviewAlreadyExist,
            AppError::RatingAlreadyExist => ErrorCode::RatingAlreadyExist,
            AppError::BookHistoryNotFound => ErrorCode::BookHistoryNotFound,
            AppError::InvalidPageNumber { .. } => ErrorCode::InvalidPageNumber,
            AppError::NoRatingsFound => ErrorCode::NoRatingsFound,
            AppError::NoReviewsFound => ErrorCode::NoReviewsFound,
            AppError::ErrorCountingBooks => ErrorCode::ErrorCountingBooks,
            AppError::Database(_) => ErrorCode::StoreError,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// HTTP status class for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::BookNotFound
            | AppError::BookHistoryNotFound
            | AppError::NoRatingsFound
            | AppError::NoReviewsFound
            | AppError::ErrorCountingBooks => StatusCode::NOT_FOUND,
            AppError::Conflict(_)
            | AppError::BookOutOfStock
            | AppError::BookLimitExceeded { .. }
            | AppError::CannotIssueSameBook
            | AppError::OutstandingDueCharges(_)
            | AppError::ReviewAlreadyExist
            | AppError::RatingAlreadyExist => StatusCode::CONFLICT,
            AppError::Validation(_)
            | AppError::BookNotIssued
            | AppError::SubmitDateInvalid
            | AppError::InvalidDateRange
            | AppError::InvalidPageNumber { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when `err` is a unique violation on the named constraint or index
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation() && db.constraint() == Some(constraint))
        .unwrap_or(false)
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
