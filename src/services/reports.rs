//! Reporting service: catalog search, book details, issue history and
//! rating/review summaries. Read only.

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetails, BookQuery, BookSearchPage},
        gallery::GalleryImage,
        history::{BookHistoryEntry, LibrarySummary},
        pagination::Pagination,
        rating::{average_rating, RatingEntry, RatingsSummary},
        review::{ReviewEntry, ReviewsSummary},
    },
    repository::Repository,
};

/// Join books with their gallery, ratings and reviews.
/// Input rows may come in any order; per-book order is preserved.
pub fn assemble_book_details(
    books: Vec<Book>,
    gallery: Vec<GalleryImage>,
    ratings: Vec<RatingEntry>,
    reviews: Vec<ReviewEntry>,
) -> Vec<BookDetails> {
    let mut gallery_by_book: HashMap<i32, Vec<GalleryImage>> = HashMap::new();
    for image in gallery {
        gallery_by_book.entry(image.book_id).or_default().push(image);
    }
    let mut ratings_by_book: HashMap<i32, Vec<RatingEntry>> = HashMap::new();
    for rating in ratings {
        ratings_by_book.entry(rating.book_id).or_default().push(rating);
    }
    let mut reviews_by_book: HashMap<i32, Vec<ReviewEntry>> = HashMap::new();
    for review in reviews {
        reviews_by_book.entry(review.book_id).or_default().push(review);
    }

    books
        .into_iter()
        .map(|book| {
            let gallery = gallery_by_book.remove(&book.id).unwrap_or_default();
            let ratings = ratings_by_book.remove(&book.id).unwrap_or_default();
            let reviews = reviews_by_book.remove(&book.id).unwrap_or_default();
            let cover_image = gallery
                .iter()
                .find(|g| g.is_cover())
                .map(|g| g.image_path.clone());
            let average_rating = average_rating(&ratings);

            BookDetails {
                book,
                cover_image,
                gallery,
                ratings,
                average_rating,
                reviews,
            }
        })
        .collect()
}

/// Reject a search over an empty catalog, then one whose filter matched nothing
fn check_search_counts(active: i64, matching: Option<i64>) -> AppResult<()> {
    if active == 0 {
        return Err(AppError::ErrorCountingBooks);
    }
    if matching == Some(0) {
        return Err(AppError::BookNotFound);
    }
    Ok(())
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    default_page_size: i64,
}

impl ReportsService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self {
            repository,
            default_page_size,
        }
    }

    fn pagination(&self, page: Option<i64>, page_size: Option<i64>) -> Pagination {
        Pagination::new(page, page_size, self.default_page_size)
    }

    /// Search the active catalog.
    ///
    /// An empty catalog fails with `ErrorCountingBooks`, a filter matching
    /// nothing with `BookNotFound`, a page past the end with `InvalidPageNumber`.
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<BookSearchPage> {
        let active = self.repository.books_count_active().await?;
        check_search_counts(active, None)?;

        let criteria = query.criteria();
        let total = self.repository.books_count_matching(&criteria).await?;
        check_search_counts(active, Some(total))?;

        let pagination = self.pagination(query.page, query.page_size);
        let page_info = pagination.check(total)?;
        let books = self.repository.books_search(&criteria, &pagination).await?;

        tracing::debug!("Book search {:?}: {} of {} result(s)", criteria, books.len(), total);

        Ok(BookSearchPage {
            books,
            pagination: page_info,
        })
    }

    /// Every active book with gallery, ratings and reviews
    pub async fn get_all_book_details(&self) -> AppResult<Vec<BookDetails>> {
        let books = self.repository.books_list_active().await?;
        if books.is_empty() {
            return Err(AppError::BookNotFound);
        }

        let keys: Vec<i32> = books.iter().map(|b| b.id).collect();
        let gallery = self.repository.gallery_for_books(&keys).await?;
        let ratings = self.repository.ratings_for_books(&keys).await?;
        let reviews = self.repository.reviews_for_books(&keys).await?;

        Ok(assemble_book_details(books, gallery, ratings, reviews))
    }

    /// Issue history of a user with charges recomputed from the stored dates
    pub async fn get_issue_history(&self, user_id: i32) -> AppResult<Vec<BookHistoryEntry>> {
        let rows = self.repository.history_for_user(user_id).await?;
        if rows.is_empty() {
            return Err(AppError::BookHistoryNotFound);
        }

        rows.into_iter().map(BookHistoryEntry::try_from).collect()
    }

    /// Borrowing counters and balances of a user
    pub async fn get_library_summary(&self, user_id: i32) -> AppResult<LibrarySummary> {
        self.repository.users_library_summary(user_id).await
    }

    /// Rating count and average of a book
    pub async fn get_ratings_summary(&self, book_id: &str) -> AppResult<RatingsSummary> {
        let book = self.repository.books_get_by_book_id(book_id).await?;
        let (total_ratings, average_rating) = self.repository.ratings_aggregate(book.id).await?;
        if total_ratings == 0 {
            return Err(AppError::NoRatingsFound);
        }

        Ok(RatingsSummary {
            book_id: book.book_id,
            total_ratings,
            average_rating,
        })
    }

    /// One page of a book's reviews
    pub async fn get_reviews_summary(
        &self,
        book_id: &str,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> AppResult<ReviewsSummary> {
        let book = self.repository.books_get_by_book_id(book_id).await?;

        let total = self.repository.reviews_count_for_book(book.id).await?;
        if total == 0 {
            return Err(AppError::NoReviewsFound);
        }

        let pagination = self.pagination(page, page_size);
        let page_info = pagination.check(total)?;

        let reviews = self
            .repository
            .reviews_page_for_book(book.id, &pagination)
            .await?;
        if reviews.is_empty() {
            return Err(AppError::NoReviewsFound);
        }

        Ok(ReviewsSummary {
            book_id: book.book_id,
            reviews,
            pagination: page_info,
        })
    }
}
