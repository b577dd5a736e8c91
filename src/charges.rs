//! Loan charge calculation.
//!
//! A loan is billed per started day: `used_days = ceil((submit - issue) / 1 day)`
//! and `total = used_days * rate`. A loan returned at the instant it was issued
//! uses zero days and costs nothing; there is no minimum billed day.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

/// Result of billing one loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charge {
    pub used_days: i64,
    pub total_amount: Decimal,
}

/// Number of started days between `issue` and `submit`
pub fn used_days(issue: DateTime<Utc>, submit: DateTime<Utc>) -> AppResult<i64> {
    if submit < issue {
        return Err(AppError::InvalidDateRange);
    }
    let elapsed = submit - issue;
    let whole_days = elapsed.num_days();
    if elapsed > Duration::days(whole_days) {
        Ok(whole_days + 1)
    } else {
        Ok(whole_days)
    }
}

/// Bill a loan at `rate` per day
pub fn calculate(issue: DateTime<Utc>, submit: DateTime<Utc>, rate: Decimal) -> AppResult<Charge> {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(AppError::Validation(format!("Negative daily rate {}", rate)));
    }
    let used_days = used_days(issue, submit)?;
    Ok(Charge {
        used_days,
        total_amount: Decimal::from(used_days) * rate,
    })
}
