//! Book gallery methods on Repository

use chrono::Utc;

use super::Repository;
use crate::{
    error::AppResult,
    models::gallery::{CreateGalleryImage, GalleryImage},
};

impl Repository {
    /// Register an image for a book (storage key)
    pub async fn gallery_create(&self, book_key: i32, image: &CreateGalleryImage) -> AppResult<GalleryImage> {
        let row = sqlx::query_as::<_, GalleryImage>(
            r#"
            INSERT INTO book_gallery (book_id, image_name, image_path, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_key)
        .bind(&image.image_name)
        .bind(&image.image_path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Gallery images of several books, newest first
    pub async fn gallery_for_books(&self, book_keys: &[i32]) -> AppResult<Vec<GalleryImage>> {
        let rows = sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM book_gallery WHERE book_id = ANY($1) ORDER BY created_at DESC, id DESC",
        )
        .bind(book_keys)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
