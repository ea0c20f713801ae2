//! Borrow request workflow service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{BorrowRequest, RequestDetails, RequestStatus, SubmitRequest},
    repository::Repository,
    services::Notifier,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    notifier: Arc<dyn Notifier>,
}

impl RequestsService {
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Submit an acquisition request on behalf of a reader
    pub async fn submit(&self, user_id: i32, request: SubmitRequest) -> AppResult<BorrowRequest> {
        request.validate()?;
        if let Some(ref year) = request.publish_year {
            if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::Validation(
                    "Please enter a valid 4-digit year".to_string(),
                ));
            }
        }
        let user = self.repository.users.get_by_id(user_id).await?;
        let created = self.repository.requests.create(user_id, &request).await?;
        tracing::info!(
            id = created.id,
            user = %user.email,
            title = %created.title,
            "borrow request submitted"
        );
        self.notifier.request_submitted(&user, &created).await;
        Ok(created)
    }

    /// Approve a pending request
    pub async fn approve(&self, id: i32) -> AppResult<BorrowRequest> {
        let updated = self
            .repository
            .requests
            .set_status(id, RequestStatus::Approved)
            .await?;
        tracing::info!(id, "borrow request approved");
        self.notifier.request_processed(&updated).await;
        Ok(updated)
    }

    /// Reject a pending request
    pub async fn reject(&self, id: i32) -> AppResult<BorrowRequest> {
        let updated = self
            .repository
            .requests
            .set_status(id, RequestStatus::Rejected)
            .await?;
        tracing::info!(id, "borrow request rejected");
        self.notifier.request_processed(&updated).await;
        Ok(updated)
    }

    /// All requests with requester details
    pub async fn list(&self) -> AppResult<Vec<RequestDetails>> {
        self.repository.requests.list().await
    }

    /// Count pending requests
    pub async fn count_pending(&self) -> AppResult<i64> {
        self.repository.requests.count_pending().await
    }
}
