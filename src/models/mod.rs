//! Data models for Bookshelf

pub mod book;
pub mod gallery;
pub mod history;
pub mod pagination;
pub mod rating;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDetails, BookQuery, BookSearchCriteria, BookSearchPage, BookSearchResult};
pub use gallery::GalleryImage;
pub use history::{BookHistory, BookHistoryEntry, LibrarySummary, ReturnReceipt};
pub use pagination::{PageInfo, PageQuery, Pagination};
pub use rating::{BookRating, RatingsSummary};
pub use review::{BookReview, ReviewsSummary};
pub use user::{User, UserClaims};
