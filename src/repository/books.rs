//! In-memory catalog store

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

use super::{CatalogState, LedgerState, Shared};

/// Lazy, restartable search over a catalog snapshot. An empty query matches
/// every book; otherwise matching is a case-insensitive substring test over
/// title, author, genre and ISBN.
pub fn search<'a, I>(books: I, query: &'a str) -> impl Iterator<Item = &'a Book>
where
    I: Iterator<Item = &'a Book>,
{
    books.filter(move |book| query.is_empty() || book.matches(query))
}

#[derive(Clone)]
pub struct BooksRepository {
    catalog: Shared<CatalogState>,
    ledger: Shared<LedgerState>,
}

impl BooksRepository {
    pub(crate) fn new(catalog: Shared<CatalogState>, ledger: Shared<LedgerState>) -> Self {
        Self { catalog, ledger }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let catalog = self.catalog.read().await;
        catalog
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books; an empty or absent query returns the whole catalog in
    /// insertion order
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let catalog = self.catalog.read().await;
        let q = query.q.as_deref().unwrap_or("");
        Ok(search(catalog.books.values(), q).cloned().collect())
    }

    /// Create a new book; every copy starts available
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut catalog = self.catalog.write().await;
        let id = catalog.allocate_id();
        let created = Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            published_year: book.published_year,
            isbn: book.isbn.clone(),
            total_copies: book.total_copies,
            available_copies: book.total_copies,
            created_at: Utc::now(),
        };
        catalog.books.insert(id, created.clone());
        Ok(created)
    }

    /// Update a book. `available_copies` is recomputed as the new total
    /// minus the copies currently out on loan, which keeps the availability
    /// invariant across edits of `total_copies`.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut catalog = self.catalog.write().await;
        let ledger = self.ledger.read().await;

        let on_loan = ledger.active_loans_for_book(id) as u32;
        let existing = catalog
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if book.total_copies < on_loan {
            return Err(AppError::Validation(format!(
                "Cannot reduce total copies below the {} currently on loan",
                on_loan
            )));
        }

        existing.title = book.title.clone();
        existing.author = book.author.clone();
        existing.genre = book.genre.clone();
        existing.published_year = book.published_year;
        existing.isbn = book.isbn.clone();
        existing.total_copies = book.total_copies;
        existing.available_copies = book.total_copies - on_loan;

        Ok(existing.clone())
    }

    /// Delete a book. Fails while any active borrow record references it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut catalog = self.catalog.write().await;
        let ledger = self.ledger.read().await;

        if !catalog.books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        if ledger.active_loans_for_book(id) > 0 {
            return Err(AppError::Conflict(
                "Book has active borrow records".to_string(),
            ));
        }

        catalog.books.shift_remove(&id);
        Ok(())
    }

    /// Book and copy counts for statistics: (books, total copies, available copies)
    pub async fn copy_counts(&self) -> AppResult<(i64, i64, i64)> {
        let catalog = self.catalog.read().await;
        let books = catalog.books.len() as i64;
        let total = catalog
            .books
            .values()
            .map(|book| book.total_copies as i64)
            .sum();
        let available = catalog
            .books
            .values()
            .map(|book| book.available_copies as i64)
            .sum();
        Ok((books, total, available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    fn create_book(title: &str, author: &str, genre: &str, isbn: &str, copies: u32) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year: 1951,
            isbn: isbn.to_string(),
            total_copies: copies,
        }
    }

    #[tokio::test]
    async fn create_starts_with_all_copies_available() {
        let repo = Repository::new();
        let book = repo
            .books
            .create(&create_book(
                "The Catcher in the Rye",
                "J.D. Salinger",
                "Fiction",
                "978-0-316-76948-0",
                5,
            ))
            .await
            .unwrap();
        assert_eq!(book.available_copies, 5);
        assert_eq!(book.total_copies, 5);
    }

    #[tokio::test]
    async fn search_is_restartable_and_matches_any_field() {
        let repo = Repository::new();
        repo.books
            .create(&create_book(
                "The Hobbit",
                "J.R.R. Tolkien",
                "Fantasy",
                "978-0-618-00221-4",
                3,
            ))
            .await
            .unwrap();
        repo.books
            .create(&create_book(
                "Pride and Prejudice",
                "Jane Austen",
                "Classic",
                "978-0-14-143951-8",
                4,
            ))
            .await
            .unwrap();

        let all = repo
            .books
            .search(&BookQuery { q: None })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        // The matcher itself is a lazy adapter that can be restarted on the
        // same snapshot.
        let matches: Vec<_> = search(all.iter(), "tolkien").collect();
        assert_eq!(matches.len(), 1);
        let again: Vec<_> = search(all.iter(), "tolkien").collect();
        assert_eq!(again.len(), matches.len());

        let by_isbn = repo
            .books
            .search(&BookQuery {
                q: Some("978-0-14".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_isbn.len(), 1);
        assert_eq!(by_isbn[0].title, "Pride and Prejudice");
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let repo = Repository::new();
        let err = repo
            .books
            .update(
                42,
                &UpdateBook {
                    title: "The Hobbit".to_string(),
                    author: "J.R.R. Tolkien".to_string(),
                    genre: "Fantasy".to_string(),
                    published_year: 1937,
                    isbn: "978-0-618-00221-4".to_string(),
                    total_copies: 3,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_book_is_not_found() {
        let repo = Repository::new();
        let err = repo.books.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
