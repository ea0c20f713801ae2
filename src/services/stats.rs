//! Statistics service
//!
//! Every number is recomputed from the live stores on each call; nothing is
//! cached or stored.

use crate::{
    api::stats::{BookStats, LoanStats, RequestStats, StatsResponse, UserStats},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get library statistics
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let (books, total_copies, available_copies) = self.repository.books.copy_counts().await?;
        let active = self.repository.loans.count_active().await?;
        let overdue = self.repository.loans.count_overdue().await?;
        let pending = self.repository.requests.count_pending().await?;
        let (total_users, active_users) = self.repository.users.counts().await?;

        Ok(StatsResponse {
            books: BookStats {
                total: books,
                total_copies,
                available_copies,
            },
            loans: LoanStats { active, overdue },
            requests: RequestStats { pending },
            users: UserStats {
                total: total_users,
                active: active_users,
            },
        })
    }
}
