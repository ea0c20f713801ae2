//! Loan management service

use std::sync::Arc;

use crate::{
    config::LoansConfig,
    error::AppResult,
    models::{
        book::Book,
        loan::{BorrowRecord, LoanDetails},
    },
    repository::Repository,
    services::Notifier,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
    notifier: Arc<dyn Notifier>,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            config,
            notifier,
        }
    }

    /// Get active loans for a user
    pub async fn get_user_loans(&self, user_id: i32) -> AppResult<Vec<LoanDetails>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.user_loans(user_id).await
    }

    /// Get a borrow record by ID
    pub async fn get_record(&self, id: i32) -> AppResult<BorrowRecord> {
        self.repository.loans.get_by_id(id).await
    }

    /// Borrow a book for a user
    pub async fn borrow(&self, user_id: i32, book_id: i32) -> AppResult<BorrowRecord> {
        let (record, book) = self
            .repository
            .loans
            .create(user_id, book_id, self.config.period_days)
            .await?;
        tracing::info!(user_id, book_id, record_id = record.id, "book borrowed");

        let user = self.repository.users.get_by_id(user_id).await?;
        self.notifier.loan_created(&user, &book, record.due_date).await;
        Ok(record)
    }

    /// Return a borrowed book, yielding the updated book
    pub async fn return_book(&self, record_id: i32) -> AppResult<Book> {
        let (record, book) = self.repository.loans.return_record(record_id).await?;
        tracing::info!(record_id = record.id, book_id = book.id, "book returned");
        Ok(book)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        self.repository.loans.count_active().await
    }

    /// Count overdue loans
    pub async fn count_overdue(&self) -> AppResult<i64> {
        self.repository.loans.count_overdue().await
    }
}
