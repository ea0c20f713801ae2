//! Outbound notification collaborator
//!
//! The gateway depends on this interface; the server binary wires a
//! tracing-backed implementation, and a deployment with a mail system can
//! substitute its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{book::Book, request::BorrowRequest, user::UserAccount};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// A borrow succeeded; the borrower gets a confirmation
    async fn loan_created(&self, user: &UserAccount, book: &Book, due_date: DateTime<Utc>);
    /// An acquisition request was submitted; librarians are notified
    async fn request_submitted(&self, user: &UserAccount, request: &BorrowRequest);
    /// A request was approved or rejected; the requester hears back
    async fn request_processed(&self, request: &BorrowRequest);
}

/// Notifier that only logs, for development and tests
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn loan_created(&self, user: &UserAccount, book: &Book, due_date: DateTime<Utc>) {
        tracing::info!(
            user = %user.email,
            book = %book.title,
            due_date = %due_date,
            "loan confirmation"
        );
    }

    async fn request_submitted(&self, user: &UserAccount, request: &BorrowRequest) {
        tracing::info!(
            user = %user.email,
            title = %request.title,
            "borrow request received"
        );
    }

    async fn request_processed(&self, request: &BorrowRequest) {
        tracing::info!(
            id = request.id,
            status = %request.status,
            "borrow request processed"
        );
    }
}
