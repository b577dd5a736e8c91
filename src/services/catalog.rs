//! Catalog management service

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook},
        gallery::{CreateGalleryImage, GalleryImage},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let created = self.repository.books_create(&book).await?;
        tracing::info!("Catalog: created book {} ({} copies)", created.book_id, created.quantity_total);
        Ok(created)
    }

    /// Soft delete a book
    pub async fn delete_book(&self, book_id: &str) -> AppResult<()> {
        self.repository.books_soft_delete(book_id).await?;
        tracing::info!("Catalog: deleted book {}", book_id);
        Ok(())
    }

    /// Register an image for a book
    pub async fn add_gallery_image(&self, book_id: &str, image: CreateGalleryImage) -> AppResult<GalleryImage> {
        let book = self.repository.books_get_by_book_id(book_id).await?;
        self.repository.gallery_create(book.id, &image).await
    }
}
