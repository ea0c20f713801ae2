//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Catalog counters
#[derive(Serialize, ToSchema)]
pub struct BookStats {
    pub total: i64,
    pub total_copies: i64,
    pub available_copies: i64,
}

/// Loan counters
#[derive(Serialize, ToSchema)]
pub struct LoanStats {
    pub active: i64,
    pub overdue: i64,
}

/// Borrow request counters
#[derive(Serialize, ToSchema)]
pub struct RequestStats {
    pub pending: i64,
}

/// Directory counters
#[derive(Serialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
}

/// Library statistics, recomputed from the stores on every call
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub books: BookStats,
    pub loans: LoanStats,
    pub requests: RequestStats,
    pub users: UserStats,
}

/// Get library statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Library statistics", body = StatsResponse),
        (status = 403, description = "Librarian privileges required")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    claims.require_librarian()?;

    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
