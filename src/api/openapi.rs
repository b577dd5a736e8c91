//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, reviews, users};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Library book issuance and review REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::search_books,
        books::get_book_details,
        books::create_book,
        books::delete_book,
        books::add_gallery_image,
        // Loans
        loans::issue_book,
        loans::return_book,
        // Reviews
        reviews::add_review,
        reviews::get_reviews,
        reviews::add_rating,
        reviews::get_ratings,
        // Users
        users::get_my_history,
        users::get_user_history,
        users::get_my_summary,
        users::get_user_summary,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookQuery,
            crate::models::book::BookSearchResult,
            crate::models::book::BookSearchPage,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::gallery::GalleryImage,
            crate::models::gallery::CreateGalleryImage,
            crate::models::pagination::PageInfo,
            // Loans
            crate::models::history::BookHistory,
            crate::models::history::IssueBookRequest,
            crate::models::history::ReturnBookRequest,
            crate::models::history::ReturnReceipt,
            crate::models::history::BookHistoryEntry,
            crate::models::history::LibrarySummary,
            // Reviews
            crate::models::review::BookReview,
            crate::models::review::ReviewEntry,
            crate::models::review::AddReview,
            crate::models::review::ReviewsSummary,
            crate::models::rating::BookRating,
            crate::models::rating::RatingEntry,
            crate::models::rating::AddRating,
            crate::models::rating::RatingsSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog search and maintenance"),
        (name = "loans", description = "Book issue and return"),
        (name = "reviews", description = "Reviews and ratings"),
        (name = "users", description = "Per-user history and summary")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/books"));
        assert!(doc.paths.paths.contains_key("/books/{book_id}/issue"));
        assert!(doc.paths.paths.contains_key("/users/me/history"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
