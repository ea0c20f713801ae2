//! Catalog management service

use chrono::{Datelike, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

fn check_published_year(year: i32) -> AppResult<()> {
    let current = Utc::now().year();
    if year < 1000 || year > current {
        return Err(AppError::Validation(format!(
            "Published year must be between 1000 and {}",
            current
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        check_published_year(book.published_year)?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(id = created.id, title = %created.title, "book added to catalog");
        Ok(created)
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;
        check_published_year(book.published_year)?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(id, "book removed from catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_book_rejects_invalid_fields_before_touching_the_store() {
        let service = CatalogService::new(Repository::new());
        let err = service
            .create_book(CreateBook {
                title: "X".to_string(),
                author: "Jane Austen".to_string(),
                genre: "Classic".to_string(),
                published_year: 1813,
                isbn: "978-0-14-143951-8".to_string(),
                total_copies: 4,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let all = service
            .search_books(&BookQuery { q: None })
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn published_year_must_be_between_1000_and_today() {
        let service = CatalogService::new(Repository::new());
        let book = |year: i32| CreateBook {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            genre: "Fantasy".to_string(),
            published_year: year,
            isbn: "978-0-618-00221-4".to_string(),
            total_copies: 3,
        };

        let err = service.create_book(book(999)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let future = chrono::Utc::now().year() + 1;
        let err = service.create_book(book(future)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        service.create_book(book(1937)).await.unwrap();
    }
}
