//! Per-user reports

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::history::{BookHistoryEntry, LibrarySummary},
};

use super::AuthenticatedUser;

/// Issue history of the caller
#[utoipa::path(
    get,
    path = "/users/me/history",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Issue history", body = Vec<BookHistoryEntry>),
        (status = 404, description = "No history", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_my_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookHistoryEntry>>> {
    let history = state.services.reports.get_issue_history(claims.user_id).await?;
    Ok(Json(history))
}

/// Issue history of a user
#[utoipa::path(
    get,
    path = "/users/{id}/history",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Issue history", body = Vec<BookHistoryEntry>),
        (status = 403, description = "Not allowed to read this user", body = crate::error::ErrorResponse),
        (status = 404, description = "No history", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BookHistoryEntry>>> {
    let user_id = claims.target_user(Some(id))?;
    let history = state.services.reports.get_issue_history(user_id).await?;
    Ok(Json(history))
}

/// Library summary of the caller
#[utoipa::path(
    get,
    path = "/users/me/summary",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Library summary", body = LibrarySummary),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_my_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<LibrarySummary>> {
    let summary = state.services.reports.get_library_summary(claims.user_id).await?;
    Ok(Json(summary))
}

/// Library summary of a user
#[utoipa::path(
    get,
    path = "/users/{id}/summary",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Library summary", body = LibrarySummary),
        (status = 403, description = "Not allowed to read this user", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LibrarySummary>> {
    let user_id = claims.target_user(Some(id))?;
    let summary = state.services.reports.get_library_summary(user_id).await?;
    Ok(Json(summary))
}
