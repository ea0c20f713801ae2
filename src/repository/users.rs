//! In-memory user directory store

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::user::{Register, UserAccount, UserQuery, UserStatus},
};

use super::{DirectoryState, LedgerState, Shared};

#[derive(Clone)]
pub struct UsersRepository {
    ledger: Shared<LedgerState>,
    directory: Shared<DirectoryState>,
}

impl UsersRepository {
    pub(crate) fn new(ledger: Shared<LedgerState>, directory: Shared<DirectoryState>) -> Self {
        Self { ledger, directory }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<UserAccount> {
        let directory = self.directory.read().await;
        directory
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let directory = self.directory.read().await;
        Ok(directory.find_by_email(email).cloned())
    }

    /// Create an account. Email uniqueness is case-insensitive; on conflict
    /// the directory is left untouched.
    pub async fn create(&self, register: &Register, password_hash: String) -> AppResult<UserAccount> {
        let mut directory = self.directory.write().await;

        if directory.find_by_email(&register.email).is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let id = directory.allocate_id();
        let user = UserAccount {
            id,
            name: register.name.clone(),
            email: register.email.clone(),
            password_hash,
            role: register.role,
            student_id: register.student_id.clone(),
            staff_id: register.staff_id.clone(),
            department: register.department.clone(),
            status: UserStatus::Active,
            created_at: Utc::now(),
        };
        directory.users.insert(id, user.clone());
        Ok(user)
    }

    /// Search users by name, email or role id substring; an empty query
    /// returns the whole directory in registration order
    pub async fn search(&self, query: &UserQuery) -> AppResult<Vec<UserAccount>> {
        let directory = self.directory.read().await;
        let q = query.q.as_deref().unwrap_or("");
        Ok(directory
            .users
            .values()
            .filter(|user| q.is_empty() || user.matches(q))
            .cloned()
            .collect())
    }

    /// Set account status (active / suspended)
    pub async fn set_status(&self, id: i32, status: UserStatus) -> AppResult<UserAccount> {
        let mut directory = self.directory.write().await;
        let user = directory
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        user.status = status;
        Ok(user.clone())
    }

    /// Delete an account; blocked while the user holds any active borrow
    /// record.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let ledger = self.ledger.read().await;
        let mut directory = self.directory.write().await;

        if !directory.users.contains_key(&id) {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        if ledger.user_has_active_loans(id) {
            return Err(AppError::Conflict(
                "User has active borrow records".to_string(),
            ));
        }

        directory.users.shift_remove(&id);
        Ok(())
    }

    /// User counts for statistics: (total, active)
    pub async fn counts(&self) -> AppResult<(i64, i64)> {
        let directory = self.directory.read().await;
        let total = directory.users.len() as i64;
        let active = directory
            .users
            .values()
            .filter(|user| user.is_active())
            .count() as i64;
        Ok((total, active))
    }
}
