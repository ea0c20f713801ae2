//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, loans, requests, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LibraryHub API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::get_user_loans,
        loans::create_loan,
        loans::return_loan,
        // Requests
        requests::submit_request,
        requests::list_requests,
        requests::approve_request,
        requests::reject_request,
        // Users
        users::list_users,
        users::get_user,
        users::set_status,
        users::delete_user,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::Login,
            crate::models::user::Register,
            crate::models::user::Role,
            crate::models::user::SetStatus,
            crate::models::user::UserAccount,
            crate::models::user::UserQuery,
            crate::models::user::UserStatus,
            crate::models::user::UserSummary,
            // Books
            crate::models::book::Book,
            crate::models::book::BookQuery,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Loans
            crate::models::loan::BorrowRecord,
            crate::models::loan::CreateLoan,
            crate::models::loan::LoanDetails,
            loans::ReturnResponse,
            // Requests
            crate::models::request::BorrowRequest,
            crate::models::request::RequestDetails,
            crate::models::request::RequestStatus,
            crate::models::request::SubmitRequest,
            // Stats
            stats::BookStats,
            stats::LoanStats,
            stats::RequestStats,
            stats::StatsResponse,
            stats::UserStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "loans", description = "Borrow lifecycle"),
        (name = "requests", description = "Acquisition requests"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
