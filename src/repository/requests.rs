//! In-memory borrow request store

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::request::{BorrowRequest, RequestDetails, RequestStatus, SubmitRequest},
};

use super::{DirectoryState, LedgerState, Shared};

#[derive(Clone)]
pub struct RequestsRepository {
    ledger: Shared<LedgerState>,
    directory: Shared<DirectoryState>,
}

impl RequestsRepository {
    pub(crate) fn new(ledger: Shared<LedgerState>, directory: Shared<DirectoryState>) -> Self {
        Self { ledger, directory }
    }

    /// Get borrow request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRequest> {
        let ledger = self.ledger.read().await;
        ledger
            .requests
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow request with id {} not found", id)))
    }

    /// Create a pending acquisition request for a user
    pub async fn create(&self, user_id: i32, request: &SubmitRequest) -> AppResult<BorrowRequest> {
        let mut ledger = self.ledger.write().await;
        let directory = self.directory.read().await;

        if !directory.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        let id = ledger.allocate_request_id();
        let created = BorrowRequest {
            id,
            user_id,
            title: request.title.clone(),
            author: request.author.clone(),
            isbn: request.isbn.clone(),
            publish_year: request.publish_year.clone(),
            reason: request.reason.clone(),
            status: RequestStatus::Pending,
            request_date: Utc::now(),
        };
        ledger.requests.insert(id, created.clone());
        Ok(created)
    }

    /// All requests with requester details, in submission order
    pub async fn list(&self) -> AppResult<Vec<RequestDetails>> {
        let ledger = self.ledger.read().await;
        let directory = self.directory.read().await;

        Ok(ledger
            .requests
            .values()
            .map(|request| {
                let user = directory.users.get(&request.user_id);
                RequestDetails {
                    id: request.id,
                    title: request.title.clone(),
                    author: request.author.clone(),
                    isbn: request.isbn.clone(),
                    publish_year: request.publish_year.clone(),
                    reason: request.reason.clone(),
                    status: request.status,
                    request_date: request.request_date,
                    user_name: user.map(|u| u.name.clone()).unwrap_or_default(),
                    user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Resolve a pending request. Approved and rejected are terminal states,
    /// so a request can only be processed once.
    pub async fn set_status(&self, id: i32, status: RequestStatus) -> AppResult<BorrowRequest> {
        let mut ledger = self.ledger.write().await;
        let request = ledger
            .requests
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Borrow request with id {} not found", id)))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Request has already been {}",
                request.status
            )));
        }

        request.status = status;
        Ok(request.clone())
    }

    /// Count pending requests
    pub async fn count_pending(&self) -> AppResult<i64> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .requests
            .values()
            .filter(|request| request.status == RequestStatus::Pending)
            .count() as i64)
    }
}
