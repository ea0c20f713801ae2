//! Demo data for development
//!
//! Mirrors the sample catalog and accounts the original prototype shipped
//! with. Everything is loaded through the regular gateway operations, so
//! the seeded state obeys the same rules as user input.

use crate::{
    error::AppResult,
    models::{
        book::CreateBook,
        request::SubmitRequest,
        user::{Register, Role},
    },
    services::Services,
};

/// Seed the stores with a small demo library
pub async fn demo_data(services: &Services) -> AppResult<()> {
    let books = [
        ("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1951, "978-0-316-76948-0", 5),
        ("Pride and Prejudice", "Jane Austen", "Classic", 1813, "978-0-14-143951-8", 4),
        ("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, "978-0-618-00221-4", 3),
        ("Harry Potter and the Philosopher's Stone", "J.K. Rowling", "Fantasy", 1997, "978-0-7475-3269-9", 8),
        ("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", 1954, "978-0-618-57498-5", 6),
    ];

    let mut book_ids = Vec::new();
    for (title, author, genre, published_year, isbn, total_copies) in books {
        let book = services
            .catalog
            .create_book(CreateBook {
                title: title.to_string(),
                author: author.to_string(),
                genre: genre.to_string(),
                published_year,
                isbn: isbn.to_string(),
                total_copies,
            })
            .await?;
        book_ids.push(book.id);
    }

    let reader = services
        .users
        .register(Register {
            name: "John Doe".to_string(),
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
            role: Role::Reader,
            student_id: Some("STU12345".to_string()),
            staff_id: None,
            department: None,
        })
        .await?;

    services
        .users
        .register(Register {
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Librarian,
            student_id: None,
            staff_id: Some("LIB12345".to_string()),
            department: Some("Reference Section".to_string()),
        })
        .await?;

    // One active loan and a couple of pending requests so dashboards have
    // something to show
    services.loans.borrow(reader.id, book_ids[0]).await?;

    services
        .requests
        .submit(
            reader.id,
            SubmitRequest {
                title: "The Great Gatsby".to_string(),
                author: "F. Scott Fitzgerald".to_string(),
                isbn: None,
                publish_year: Some("1925".to_string()),
                reason: "Often asked for in literature classes".to_string(),
            },
        )
        .await?;
    services
        .requests
        .submit(
            reader.id,
            SubmitRequest {
                title: "To Kill a Mockingbird".to_string(),
                author: "Harper Lee".to_string(),
                isbn: None,
                publish_year: None,
                reason: "Reading group pick for next month".to_string(),
            },
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        config::{AuthConfig, LoansConfig},
        repository::Repository,
        services::{Argon2Hasher, LogNotifier},
    };

    #[tokio::test]
    async fn demo_data_respects_every_gateway_rule() {
        let services = Services::new(
            Repository::new(),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_expiration_hours: 1,
            },
            LoansConfig { period_days: 30 },
            Arc::new(Argon2Hasher),
            Arc::new(LogNotifier),
        );

        demo_data(&services).await.unwrap();

        let stats = services.stats.get_stats().await.unwrap();
        assert_eq!(stats.books.total, 5);
        assert_eq!(stats.loans.active, 1);
        assert_eq!(stats.requests.pending, 2);
        assert_eq!(stats.users.total, 2);
        // One copy of the borrowed title is out
        assert_eq!(stats.books.available_copies, stats.books.total_copies - 1);
    }
}
