//! User account model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;

/// Account role, determining which gateway operations are permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Librarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "librarian" => Ok(Role::Librarian),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full user account held by the directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserAccount {
    pub id: i32,
    pub name: String,
    /// Email address, unique across the directory (case-insensitive)
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    /// Student identifier (readers)
    pub student_id: Option<String>,
    /// Staff identifier (librarians)
    pub staff_id: Option<String>,
    /// Department (librarians)
    pub department: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Role-specific identifier: student id for readers, staff id for librarians
    pub fn role_id(&self) -> Option<&str> {
        match self.role {
            Role::Reader => self.student_id.as_deref(),
            Role::Librarian => self.staff_id.as_deref(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Case-insensitive substring match over name, email and role ids
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
            || self
                .student_id
                .as_ref()
                .is_some_and(|id| id.to_lowercase().contains(&q))
            || self
                .staff_id
                .as_ref()
                .is_some_and(|id| id.to_lowercase().contains(&q))
    }
}

/// User summary returned by login and embedded in views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserAccount> for UserSummary {
    fn from(user: &UserAccount) -> Self {
        UserSummary {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct Register {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 5, message = "Student ID must be at least 5 characters"))]
    pub student_id: Option<String>,
    #[validate(length(min = 5, message = "Staff ID must be at least 5 characters"))]
    pub staff_id: Option<String>,
    #[validate(length(min = 2, message = "Department must be at least 2 characters"))]
    pub department: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatus {
    pub status: UserStatus,
}

/// User search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UserQuery {
    /// Substring matched against name, email, student id and staff id
    pub q: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_librarian(&self) -> bool {
        self.role == Role::Librarian
    }

    /// Require librarian privileges
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.is_librarian() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Librarian privileges required".to_string(),
            ))
        }
    }

    /// Require the claims to belong to `user_id`, or librarian privileges
    pub fn require_self_or_librarian(&self, user_id: i32) -> Result<(), AppError> {
        if self.user_id == user_id || self.is_librarian() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Operation is restricted to the account owner".to_string(),
            ))
        }
    }
}
