//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod reviews;
pub mod users;

use std::time::Duration;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/books", get(books::search_books).post(books::create_book))
        .route("/books/details", get(books::get_book_details))
        .route("/books/:book_id", delete(books::delete_book))
        .route("/books/:book_id/gallery", post(books::add_gallery_image))
        // Issue and return
        .route("/books/:book_id/issue", post(loans::issue_book))
        .route("/books/:book_id/return", post(loans::return_book))
        // Reviews and ratings
        .route("/books/:book_id/reviews", get(reviews::get_reviews).post(reviews::add_review))
        .route("/books/:book_id/ratings", get(reviews::get_ratings).post(reviews::add_rating))
        // Users
        .route("/users/me/history", get(users::get_my_history))
        .route("/users/me/summary", get(users::get_my_summary))
        .route("/users/:id/history", get(users::get_user_history))
        .route("/users/:id/summary", get(users::get_user_summary))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
}
