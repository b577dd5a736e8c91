//! Book catalog methods on Repository: lookups, search with aggregates,
//! creation and soft deletion.

use chrono::Utc;

use super::Repository;
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::{
        book::{Book, BookSearchCriteria, BookSearchResult, CreateBook},
        gallery::COVER_IMAGE_NAME,
        pagination::Pagination,
    },
};

const BOOK_ID_UNIQUE: &str = "books_book_id_key";

/// Escape LIKE wildcards and wrap `term` for a case-insensitive substring match
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// WHERE clause for `criteria` over the `books b` alias, with placeholders
/// numbered from `first_param`, and the values to bind in order
pub fn criteria_filter(criteria: &BookSearchCriteria, first_param: usize) -> (String, Vec<String>) {
    let mut conditions = vec!["b.deleted_at IS NULL".to_string()];
    let mut binds = Vec::new();

    let (book_id, name) = match criteria {
        BookSearchCriteria::All => (None, None),
        BookSearchCriteria::ById(book_id) => (Some(book_id), None),
        BookSearchCriteria::ByName(name) => (None, Some(name)),
        BookSearchCriteria::Both { book_id, name } => (Some(book_id), Some(name)),
    };

    if let Some(book_id) = book_id {
        conditions.push(format!("b.book_id = ${}", first_param + binds.len()));
        binds.push(book_id.clone());
    }
    if let Some(name) = name {
        conditions.push(format!(
            "LOWER(b.name) LIKE ${} ESCAPE '\\'",
            first_param + binds.len()
        ));
        binds.push(like_pattern(name));
    }

    (conditions.join(" AND "), binds)
}

impl Repository {
    // =========================================================================
    // READ
    // =========================================================================

    /// Get an active (not soft-deleted) book by business ID
    pub async fn books_get_by_book_id(&self, book_id: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE book_id = $1 AND deleted_at IS NULL")
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::BookNotFound)
    }

    /// Count active books in the whole catalog
    pub async fn books_count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All active books ordered by name
    pub async fn books_list_active(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE deleted_at IS NULL ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Count books matching `criteria`
    pub async fn books_count_matching(&self, criteria: &BookSearchCriteria) -> AppResult<i64> {
        let (where_clause, binds) = criteria_filter(criteria, 1);
        let count_query = format!("SELECT COUNT(*) FROM books b WHERE {}", where_clause);

        let mut query = sqlx::query_scalar::<_, i64>(&count_query);
        for value in &binds {
            query = query.bind(value);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// One page of books matching `criteria`, with cover image, average
    /// rating, review count and publish year
    pub async fn books_search(
        &self,
        criteria: &BookSearchCriteria,
        pagination: &Pagination,
    ) -> AppResult<Vec<BookSearchResult>> {
        // $1 is the cover image name, filters follow
        let (where_clause, binds) = criteria_filter(criteria, 2);
        let limit_param = binds.len() + 2;

        let select_query = format!(
            r#"
            SELECT b.book_id, b.name, b.author, b.quantity_total, b.quantity_available,
                   b.charge_per_day, b.published_date,
                   EXTRACT(YEAR FROM b.published_date)::int4 AS publish_year,
                   (SELECT g.image_path FROM book_gallery g
                    WHERE g.book_id = b.id AND g.image_name = $1
                    ORDER BY g.created_at DESC, g.id DESC
                    LIMIT 1) AS cover_image,
                   COALESCE((SELECT AVG(r.rating)::float8 FROM book_ratings r
                             WHERE r.book_id = b.id), 0)::float8 AS average_rating,
                   (SELECT COUNT(*) FROM book_reviews rv WHERE rv.book_id = b.id) AS review_count
            FROM books b
            WHERE {}
            ORDER BY b.name, b.id
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            limit_param,
            limit_param + 1
        );

        let mut query = sqlx::query_as::<_, BookSearchResult>(&select_query).bind(COVER_IMAGE_NAME);
        for value in &binds {
            query = query.bind(value);
        }
        let books = query
            .bind(pagination.page_size)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    // =========================================================================
    // CREATE / DELETE
    // =========================================================================

    /// Create a book; all copies start available
    pub async fn books_create(&self, book: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();

        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                book_id, name, author, quantity_total, quantity_available,
                charge_per_day, published_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&book.book_id)
        .bind(&book.name)
        .bind(&book.author)
        .bind(book.quantity_total)
        .bind(book.charge_per_day)
        .bind(book.published_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, BOOK_ID_UNIQUE) {
                AppError::Conflict(format!("Book with id {} already exists", book.book_id))
            } else {
                e.into()
            }
        })
    }

    /// Soft delete a book. History keeps referencing it; refused while copies are on loan.
    pub async fn books_soft_delete(&self, book_id: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "SELECT id FROM books WHERE book_id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::BookNotFound)?;

        let on_loan: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_history WHERE book_id = $1 AND submit_date IS NULL)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if on_loan {
            return Err(AppError::Conflict(
                "Book has copies on loan and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET deleted_at = $2, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
