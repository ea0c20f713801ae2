//! Borrow request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{BorrowRequest, RequestDetails, SubmitRequest},
};

use super::AuthenticatedUser;

/// Submit an acquisition request for the current user
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Request created", body = BorrowRequest),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn submit_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<BorrowRequest>)> {
    let request = state
        .services
        .requests
        .submit(claims.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List all borrow requests with requester details
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All requests", body = Vec<RequestDetails>),
        (status = 403, description = "Librarian privileges required")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RequestDetails>>> {
    claims.require_librarian()?;

    let requests = state.services.requests.list().await?;
    Ok(Json(requests))
}

/// Approve a pending borrow request
#[utoipa::path(
    post,
    path = "/requests/{id}/approve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request approved", body = BorrowRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    )
)]
pub async fn approve_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRequest>> {
    claims.require_librarian()?;

    let request = state.services.requests.approve(id).await?;
    Ok(Json(request))
}

/// Reject a pending borrow request
#[utoipa::path(
    post,
    path = "/requests/{id}/reject",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = BorrowRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    )
)]
pub async fn reject_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRequest>> {
    claims.require_librarian()?;

    let request = state.services.requests.reject(id).await?;
    Ok(Json(request))
}
