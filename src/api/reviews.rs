//! Review and rating endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        pagination::PageQuery,
        rating::{AddRating, BookRating, RatingsSummary},
        review::{AddReview, BookReview, ReviewsSummary},
    },
};

use super::AuthenticatedUser;

/// Review a book
#[utoipa::path(
    post,
    path = "/books/{book_id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = AddReview,
    responses(
        (status = 201, description = "Review added", body = BookReview),
        (status = 409, description = "Book already reviewed by this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    Json(data): Json<AddReview>,
) -> AppResult<(StatusCode, Json<BookReview>)> {
    data.validate()?;
    let review = state
        .services
        .reviews
        .add_review(&claims.sub, &book_id, &data.review)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Paginated reviews of a book
#[utoipa::path(
    get,
    path = "/books/{book_id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = String, Path, description = "Book ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Reviews page", body = ReviewsSummary),
        (status = 404, description = "Book not found or not reviewed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reviews(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ReviewsSummary>> {
    query.validate()?;
    let summary = state
        .services
        .reports
        .get_reviews_summary(&book_id, query.page, query.page_size)
        .await?;
    Ok(Json(summary))
}

/// Rate a book from 1 to 5
#[utoipa::path(
    post,
    path = "/books/{book_id}/ratings",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = AddRating,
    responses(
        (status = 201, description = "Rating added", body = BookRating),
        (status = 400, description = "Rating out of range", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already rated by this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_rating(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    Json(data): Json<AddRating>,
) -> AppResult<(StatusCode, Json<BookRating>)> {
    data.validate()?;
    let rating = state
        .services
        .reviews
        .add_rating(&claims.sub, &book_id, data.rating)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// Rating count and average of a book
#[utoipa::path(
    get,
    path = "/books/{book_id}/ratings",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Ratings summary", body = RatingsSummary),
        (status = 404, description = "Book not found or not rated", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_ratings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<String>,
) -> AppResult<Json<RatingsSummary>> {
    let summary = state.services.reports.get_ratings_summary(&book_id).await?;
    Ok(Json(summary))
}
