//! Repository layer: in-memory stores
//!
//! Each store (catalog, borrow ledger, user directory) is a single owned
//! resource behind an async `RwLock`. Operations that span stores take the
//! locks they need in the fixed order catalog -> ledger -> directory and
//! hold them for the whole critical section, so every check-and-mutate is
//! atomic and no partial mutation is ever observable.

pub mod books;
pub mod loans;
pub mod requests;
pub mod users;

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::{Book, BorrowRecord, BorrowRequest, UserAccount};

pub(crate) type Shared<T> = Arc<RwLock<T>>;

/// Catalog store state
#[derive(Default)]
pub(crate) struct CatalogState {
    pub(crate) books: IndexMap<i32, Book>,
    next_id: i32,
}

impl CatalogState {
    pub(crate) fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Borrow ledger state: loan records and acquisition requests
#[derive(Default)]
pub(crate) struct LedgerState {
    pub(crate) records: IndexMap<i32, BorrowRecord>,
    pub(crate) requests: IndexMap<i32, BorrowRequest>,
    next_record_id: i32,
    next_request_id: i32,
}

impl LedgerState {
    pub(crate) fn allocate_record_id(&mut self) -> i32 {
        self.next_record_id += 1;
        self.next_record_id
    }

    pub(crate) fn allocate_request_id(&mut self) -> i32 {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn active_loans_for_book(&self, book_id: i32) -> usize {
        self.records
            .values()
            .filter(|record| record.book_id == book_id && record.is_active())
            .count()
    }

    pub(crate) fn has_active_loan(&self, user_id: i32, book_id: i32) -> bool {
        self.records.values().any(|record| {
            record.user_id == user_id && record.book_id == book_id && record.is_active()
        })
    }

    pub(crate) fn user_has_active_loans(&self, user_id: i32) -> bool {
        self.records
            .values()
            .any(|record| record.user_id == user_id && record.is_active())
    }
}

/// User directory state
#[derive(Default)]
pub(crate) struct DirectoryState {
    pub(crate) users: IndexMap<i32, UserAccount>,
    next_id: i32,
}

impl DirectoryState {
    pub(crate) fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn find_by_email(&self, email: &str) -> Option<&UserAccount> {
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }
}

/// Main repository struct holding the per-store repositories
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
    pub requests: requests::RequestsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        let catalog: Shared<CatalogState> = Arc::new(RwLock::new(CatalogState::default()));
        let ledger: Shared<LedgerState> = Arc::new(RwLock::new(LedgerState::default()));
        let directory: Shared<DirectoryState> = Arc::new(RwLock::new(DirectoryState::default()));

        Self {
            books: books::BooksRepository::new(catalog.clone(), ledger.clone()),
            loans: loans::LoansRepository::new(catalog, ledger.clone(), directory.clone()),
            requests: requests::RequestsRepository::new(ledger.clone(), directory.clone()),
            users: users::UsersRepository::new(ledger, directory),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
