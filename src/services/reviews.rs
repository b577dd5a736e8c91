//! Review and rating service. Each user may review and rate a book once.

use crate::{
    error::{AppError, AppResult},
    models::{rating::BookRating, review::BookReview},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a review of `book_id` by the user with `email`
    pub async fn add_review(&self, email: &str, book_id: &str, review: &str) -> AppResult<BookReview> {
        let user = self.repository.users_get_by_email(email).await?;
        let book = self.repository.books_get_by_book_id(book_id).await?;

        if self.repository.reviews_exists(user.id, book.id).await? {
            return Err(AppError::ReviewAlreadyExist);
        }

        let created = self.repository.reviews_create(user.id, book.id, review).await?;
        tracing::info!("User {} reviewed book {}", user.id, book_id);
        Ok(created)
    }

    /// Add a rating of `book_id` by the user with `email`
    pub async fn add_rating(&self, email: &str, book_id: &str, rating: i16) -> AppResult<BookRating> {
        let user = self.repository.users_get_by_email(email).await?;
        let book = self.repository.books_get_by_book_id(book_id).await?;

        if self.repository.ratings_exists(user.id, book.id).await? {
            return Err(AppError::RatingAlreadyExist);
        }

        let created = self.repository.ratings_create(user.id, book.id, rating).await?;
        tracing::info!("User {} rated book {} with {}", user.id, book_id, rating);
        Ok(created)
    }
}
