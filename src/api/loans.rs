//! Issue and return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::history::{BookHistory, IssueBookRequest, ReturnBookRequest, ReturnReceipt},
};

use super::AuthenticatedUser;

/// Issue a book
///
/// Users borrow for themselves; admins name the borrower in the body.
#[utoipa::path(
    post,
    path = "/books/{book_id}/issue",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    request_body(content = IssueBookRequest, description = "Optional borrower"),
    responses(
        (status = 201, description = "Book issued", body = BookHistory),
        (status = 404, description = "User or book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Issue refused by library rules", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    body: Option<Json<IssueBookRequest>>,
) -> AppResult<(StatusCode, Json<BookHistory>)> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let user_id = claims.target_user(request.user_id)?;

    let history = state.services.issuance.issue_book(user_id, &book_id).await?;
    Ok((StatusCode::CREATED, Json(history)))
}

/// Return a book
#[utoipa::path(
    post,
    path = "/books/{book_id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("book_id" = String, Path, description = "Book ID")),
    request_body(content = ReturnBookRequest, description = "Optional borrower and submit date"),
    responses(
        (status = 200, description = "Book returned", body = ReturnReceipt),
        (status = 400, description = "Book not issued to this user or submit date invalid", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<String>,
    body: Option<Json<ReturnBookRequest>>,
) -> AppResult<Json<ReturnReceipt>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let user_id = claims.target_user(request.user_id)?;

    let receipt = state
        .services
        .issuance
        .return_book(user_id, &book_id, request.submit_date)
        .await?;
    Ok(Json(receipt))
}
