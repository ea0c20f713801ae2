//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Catalog book with copy counts.
///
/// Invariant: `0 <= available_copies <= total_copies` after every operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub isbn: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Case-insensitive substring match over title, author, genre and ISBN
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.author.to_lowercase().contains(&q)
            || self.genre.to_lowercase().contains(&q)
            || self.isbn.to_lowercase().contains(&q)
    }
}

/// Short book representation embedded in loan views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author: String,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        BookShort {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}

/// Create book request. The published year is range-checked against the
/// current date by the catalog service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 2, message = "Author must be at least 2 characters"))]
    pub author: String,
    #[validate(length(min = 2, message = "Genre must be at least 2 characters"))]
    pub genre: String,
    pub published_year: i32,
    #[validate(length(min = 10, message = "ISBN must be at least 10 characters"))]
    pub isbn: String,
    #[validate(range(min = 1, message = "There must be at least one copy"))]
    pub total_copies: u32,
}

/// Update book request, same shape and rules as creation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 2, message = "Author must be at least 2 characters"))]
    pub author: String,
    #[validate(length(min = 2, message = "Genre must be at least 2 characters"))]
    pub genre: String,
    pub published_year: i32,
    #[validate(length(min = 10, message = "ISBN must be at least 10 characters"))]
    pub isbn: String,
    #[validate(range(min = 1, message = "There must be at least one copy"))]
    pub total_copies: u32,
}

/// Catalog search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Substring matched against title, author, genre and ISBN.
    /// Empty or absent returns the whole catalog.
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, genre: &str, isbn: &str) -> Book {
        Book {
            id: 1,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year: 1997,
            isbn: isbn.to_string(),
            total_copies: 1,
            available_copies: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn match_is_case_insensitive_across_fields() {
        let b = book("The Hobbit", "J.R.R. Tolkien", "Fantasy", "978-0-618-00221-4");
        assert!(b.matches("hobbit"));
        assert!(b.matches("TOLKIEN"));
        assert!(b.matches("fanta"));
        assert!(b.matches("978-0-618"));
        assert!(!b.matches("dickens"));
    }

    #[test]
    fn create_book_rejects_short_fields() {
        let req = CreateBook {
            title: "A".to_string(),
            author: "B".to_string(),
            genre: "C".to_string(),
            published_year: 1999,
            isbn: "123".to_string(),
            total_copies: 0,
        };
        let errors = req.validate().unwrap_err();
        for field in ["title", "author", "genre", "isbn", "total_copies"] {
            assert!(errors.field_errors().contains_key(field), "missing {}", field);
        }
    }
}
