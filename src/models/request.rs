//! Borrow request (acquisition suggestion) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request workflow status. Pending transitions once to Approved or
/// Rejected, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reader's suggestion to acquire a new title. The book fields are free
/// text and are never matched against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowRequest {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publish_year: Option<String>,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
}

/// Borrow request with requester details for the librarian dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDetails {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publish_year: Option<String>,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

/// Submit borrow request payload. The optional publish year is checked for
/// a 4-digit shape by the request service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRequest {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: String,
    #[validate(length(min = 2, message = "Author must be at least 2 characters"))]
    pub author: String,
    pub isbn: Option<String>,
    pub publish_year: Option<String>,
    #[validate(length(min = 10, message = "Please provide a reason of at least 10 characters"))]
    pub reason: String,
}
