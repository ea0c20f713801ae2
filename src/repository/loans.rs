//! In-memory borrow ledger store
//!
//! Borrow and return are the operations where the catalog and the ledger
//! must change together. Both write locks are held for the whole critical
//! section, so two concurrent borrows can never both observe the last copy
//! as available. Every operation either applies fully or not at all.

use chrono::{Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookShort},
        loan::{BorrowRecord, LoanDetails},
    },
};

use super::{CatalogState, DirectoryState, LedgerState, Shared};

#[derive(Clone)]
pub struct LoansRepository {
    catalog: Shared<CatalogState>,
    ledger: Shared<LedgerState>,
    directory: Shared<DirectoryState>,
}

impl LoansRepository {
    pub(crate) fn new(
        catalog: Shared<CatalogState>,
        ledger: Shared<LedgerState>,
        directory: Shared<DirectoryState>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            directory,
        }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRecord> {
        let ledger = self.ledger.read().await;
        ledger
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Borrow a book: decrement availability and create the record inside
    /// one critical section.
    pub async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        period_days: i64,
    ) -> AppResult<(BorrowRecord, Book)> {
        let mut catalog = self.catalog.write().await;
        let mut ledger = self.ledger.write().await;
        let directory = self.directory.read().await;

        let user = directory
            .users
            .get(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;
        if !user.is_active() {
            return Err(AppError::Conflict("Account is suspended".to_string()));
        }

        let book = catalog
            .books
            .get_mut(&book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if book.available_copies == 0 {
            return Err(AppError::Unavailable(format!(
                "No copies of \"{}\" are available",
                book.title
            )));
        }
        if ledger.has_active_loan(user_id, book_id) {
            return Err(AppError::Conflict(
                "Book is already borrowed by this user".to_string(),
            ));
        }

        // All preconditions hold; both mutations below are infallible.
        book.available_copies -= 1;
        let now = Utc::now();
        let id = ledger.allocate_record_id();
        let record = BorrowRecord {
            id,
            book_id,
            user_id,
            borrow_date: now,
            due_date: now + Duration::days(period_days),
            returned: false,
            returned_date: None,
        };
        ledger.records.insert(id, record.clone());

        Ok((record, book.clone()))
    }

    /// Return a borrowed book: mark the record returned and restore one
    /// copy. Only an active record can be returned; a record that is absent
    /// or already completed is not found.
    pub async fn return_record(&self, record_id: i32) -> AppResult<(BorrowRecord, Book)> {
        let mut catalog = self.catalog.write().await;
        let mut ledger = self.ledger.write().await;

        let book_id = ledger
            .records
            .get(&record_id)
            .filter(|record| record.is_active())
            .map(|record| record.book_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("No active borrow record with id {}", record_id))
            })?;

        let book = catalog.books.get_mut(&book_id).ok_or_else(|| {
            AppError::Internal(format!(
                "Book {} referenced by record {} is missing",
                book_id, record_id
            ))
        })?;
        let record = ledger.records.get_mut(&record_id).ok_or_else(|| {
            AppError::Internal(format!("Borrow record {} disappeared mid-return", record_id))
        })?;

        // Never exceeds the total, even after the total was edited down.
        book.available_copies = (book.available_copies + 1).min(book.total_copies);
        record.returned = true;
        record.returned_date = Some(Utc::now());

        Ok((record.clone(), book.clone()))
    }

    /// Active loans for a user, with book details and the overdue flag
    /// recomputed against the current date
    pub async fn user_loans(&self, user_id: i32) -> AppResult<Vec<LoanDetails>> {
        let catalog = self.catalog.read().await;
        let ledger = self.ledger.read().await;
        let now = Utc::now();

        let mut result = Vec::new();
        for record in ledger
            .records
            .values()
            .filter(|record| record.user_id == user_id && record.is_active())
        {
            let book = catalog.books.get(&record.book_id).ok_or_else(|| {
                AppError::Internal(format!(
                    "Book {} referenced by record {} is missing",
                    record.book_id, record.id
                ))
            })?;
            result.push(LoanDetails {
                id: record.id,
                book: BookShort::from(book),
                borrow_date: record.borrow_date,
                due_date: record.due_date,
                is_overdue: record.is_overdue(now),
            });
        }
        Ok(result)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let ledger = self.ledger.read().await;
        Ok(ledger.records.values().filter(|r| r.is_active()).count() as i64)
    }

    /// Count overdue loans
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let ledger = self.ledger.read().await;
        let now = Utc::now();
        Ok(ledger
            .records
            .values()
            .filter(|record| record.is_overdue(now))
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            book::CreateBook,
            user::{Register, Role, UserStatus},
        },
        repository::Repository,
    };

    async fn add_reader(repo: &Repository, name: &str, email: &str) -> i32 {
        repo.users
            .create(
                &Register {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: "password123".to_string(),
                    role: Role::Reader,
                    student_id: Some("STU12345".to_string()),
                    staff_id: None,
                    department: None,
                },
                "hash".to_string(),
            )
            .await
            .unwrap()
            .id
    }

    async fn add_book(repo: &Repository, title: &str, copies: u32) -> i32 {
        repo.books
            .create(&CreateBook {
                title: title.to_string(),
                author: "J.R.R. Tolkien".to_string(),
                genre: "Fantasy".to_string(),
                published_year: 1937,
                isbn: "978-0-618-00221-4".to_string(),
                total_copies: copies,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn borrow_then_return_round_trips_availability() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 3).await;

        let (record, book) = repo.loans.create(user_id, book_id, 30).await.unwrap();
        assert_eq!(book.available_copies, 2);
        assert!(record.is_active());
        assert_eq!(record.due_date - record.borrow_date, Duration::days(30));

        let (returned, book) = repo.loans.return_record(record.id).await.unwrap();
        assert_eq!(book.available_copies, 3);
        assert!(returned.returned);
        assert!(returned.returned_date.is_some());
    }

    #[tokio::test]
    async fn returning_twice_is_not_found() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 1).await;

        let (record, _) = repo.loans.create(user_id, book_id, 30).await.unwrap();
        repo.loans.return_record(record.id).await.unwrap();

        let err = repo.loans.return_record(record.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // The failed return must not touch availability.
        let book = repo.books.get_by_id(book_id).await.unwrap();
        assert_eq!(book.available_copies, 1);
    }

    #[tokio::test]
    async fn borrowing_without_copies_fails_and_leaves_state_unchanged() {
        let repo = Repository::new();
        let first = add_reader(&repo, "John Doe", "user@example.com").await;
        let second = add_reader(&repo, "Alice Johnson", "alice@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 1).await;

        repo.loans.create(first, book_id, 30).await.unwrap();
        let err = repo.loans.create(second, book_id, 30).await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));

        let book = repo.books.get_by_id(book_id).await.unwrap();
        assert_eq!(book.available_copies, 0);
        assert_eq!(repo.loans.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_user_cannot_borrow_the_same_book_twice() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 3).await;

        repo.loans.create(user_id, book_id, 30).await.unwrap();
        let err = repo.loans.create(user_id, book_id, 30).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let book = repo.books.get_by_id(book_id).await.unwrap();
        assert_eq!(book.available_copies, 2);
    }

    #[tokio::test]
    async fn suspended_user_cannot_borrow() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 3).await;

        repo.users
            .set_status(user_id, UserStatus::Suspended)
            .await
            .unwrap();

        let err = repo.loans.create(user_id, book_id, 30).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let book = repo.books.get_by_id(book_id).await.unwrap();
        assert_eq!(book.available_copies, 3);
    }

    #[tokio::test]
    async fn deleting_a_book_with_an_active_loan_conflicts() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 2).await;

        let (record, _) = repo.loans.create(user_id, book_id, 30).await.unwrap();
        let err = repo.books.delete(book_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        repo.loans.return_record(record.id).await.unwrap();
        repo.books.delete(book_id).await.unwrap();
    }

    #[tokio::test]
    async fn deleting_a_user_with_an_active_loan_conflicts() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 2).await;

        let (record, _) = repo.loans.create(user_id, book_id, 30).await.unwrap();
        let err = repo.users.delete(user_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        repo.loans.return_record(record.id).await.unwrap();
        repo.users.delete(user_id).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_borrows_of_the_last_copy_admit_one_winner() {
        let repo = Repository::new();
        let first = add_reader(&repo, "John Doe", "user@example.com").await;
        let second = add_reader(&repo, "Alice Johnson", "alice@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 1).await;

        let (a, b) = tokio::join!(
            repo.loans.create(first, book_id, 30),
            repo.loans.create(second, book_id, 30),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        let book = repo.books.get_by_id(book_id).await.unwrap();
        assert_eq!(book.available_copies, 0);
        assert_eq!(repo.loans.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn availability_stays_within_bounds_across_sequences() {
        let repo = Repository::new();
        let user_id = add_reader(&repo, "John Doe", "user@example.com").await;
        let other = add_reader(&repo, "Alice Johnson", "alice@example.com").await;
        let book_id = add_book(&repo, "The Hobbit", 2).await;

        let check = |book: &Book| {
            assert!(book.available_copies <= book.total_copies);
        };

        let (r1, book) = repo.loans.create(user_id, book_id, 30).await.unwrap();
        check(&book);
        let (r2, book) = repo.loans.create(other, book_id, 30).await.unwrap();
        check(&book);
        assert_eq!(book.available_copies, 0);

        let (_, book) = repo.loans.return_record(r1.id).await.unwrap();
        check(&book);
        let (_, book) = repo.loans.return_record(r2.id).await.unwrap();
        check(&book);
        assert_eq!(book.available_copies, 2);
    }
}
