//! Catalog endpoints: search, details and maintenance

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetails, BookQuery, BookSearchPage, CreateBook},
        gallery::{CreateGalleryImage, GalleryImage},
    },
};

use super::AuthenticatedUser;

/// Search active books by identifier and/or name
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "One page of matching books", body = BookSearchPage),
        (status = 400, description = "Invalid page or page size", body = crate::error::ErrorResponse),
        (status = 404, description = "No matching book", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookSearchPage>> {
    query.validate()?;
    let page = state.services.reports.search_books(&query).await?;
    Ok(Json(page))
}

/// All active books with gallery, ratings and reviews
#[utoipa::path(
    get,
    path = "/books/details",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book details", body = Vec<BookDetails>),
        (status = 404, description = "Catalog is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_details(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookDetails>>> {
    let details = state.services.reports.get_all_book_details().await?;
    Ok(Json(details))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 409, description = "Book ID already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;
    data.validate()?;
    let book = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book still has copies out", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.catalog.delete_book(&book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a gallery image for a book
#[utoipa::path(
    post,
    path = "/books/{book_id}/gallery",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    request_body = CreateGalleryImage,
    responses(
        (status = 201, description = "Image registered", body = GalleryImage),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_gallery_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    Json(data): Json<CreateGalleryImage>,
) -> AppResult<(StatusCode, Json<GalleryImage>)> {
    claims.require_admin()?;
    data.validate()?;
    let image = state.services.catalog.add_gallery_image(&book_id, data).await?;
    Ok((StatusCode::CREATED, Json(image)))
}
