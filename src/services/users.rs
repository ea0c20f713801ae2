//! Authentication and user management service

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{
        Login, Register, Role, UserAccount, UserClaims, UserQuery, UserStatus, UserSummary,
    },
    repository::Repository,
    services::PasswordHasher,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
    hasher: Arc<dyn PasswordHasher>,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            config,
            hasher,
        }
    }

    /// Register a new account
    pub async fn register(&self, register: Register) -> AppResult<UserAccount> {
        register.validate()?;
        match register.role {
            Role::Reader if register.student_id.is_none() => {
                return Err(AppError::Validation(
                    "Student ID is required for readers".to_string(),
                ));
            }
            Role::Librarian if register.staff_id.is_none() => {
                return Err(AppError::Validation(
                    "Staff ID is required for librarians".to_string(),
                ));
            }
            _ => {}
        }

        let password_hash = self.hasher.hash(&register.password)?;
        let user = self.repository.users.create(&register, password_hash).await?;
        tracing::info!(id = user.id, email = %user.email, role = %user.role, "user registered");
        Ok(user)
    }

    /// Authenticate by email and password, returning a bearer token and the
    /// user summary. Unknown email and bad password produce the same
    /// message.
    pub async fn authenticate(&self, login: &Login) -> AppResult<(String, UserSummary)> {
        let user = self
            .repository
            .users
            .get_by_email(&login.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if user.status == UserStatus::Suspended {
            return Err(AppError::Authentication("Account is suspended".to_string()));
        }

        if !self.hasher.verify(&login.password, &user.password_hash)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.create_token(&user)?;
        Ok((token, UserSummary::from(&user)))
    }

    /// Create a JWT token for a user
    fn create_token(&self, user: &UserAccount) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<UserAccount> {
        self.repository.users.get_by_id(id).await
    }

    /// Search users
    pub async fn search_users(&self, query: &UserQuery) -> AppResult<Vec<UserAccount>> {
        self.repository.users.search(query).await
    }

    /// Set account status
    pub async fn set_status(&self, id: i32, status: UserStatus) -> AppResult<UserAccount> {
        let user = self.repository.users.set_status(id, status).await?;
        tracing::info!(id, status = %user.status, "user status updated");
        Ok(user)
    }

    /// Delete an account
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!(id, "user deleted");
        Ok(())
    }

    /// User counts for statistics
    pub async fn counts(&self) -> AppResult<(i64, i64)> {
        self.repository.users.counts().await
    }
}
