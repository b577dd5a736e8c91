//! Repository layer for database operations.
//!
//! Domain methods are spread over the submodules as `impl Repository` blocks,
//! each prefixed with its domain (`books_*`, `history_*`, ...).

pub mod books;
pub mod gallery;
pub mod history;
pub mod ratings;
pub mod reviews;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
