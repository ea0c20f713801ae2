//! Business logic services

pub mod catalog;
pub mod loans;
pub mod notifier;
pub mod password;
pub mod requests;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, LoansConfig},
    repository::Repository,
};

pub use notifier::{LogNotifier, Notifier};
pub use password::{Argon2Hasher, PasswordHasher};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub requests: requests::RequestsService,
    pub users: users::UsersService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository and collaborators
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        loans_config: LoansConfig,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), loans_config, notifier.clone()),
            requests: requests::RequestsService::new(repository.clone(), notifier),
            users: users::UsersService::new(repository.clone(), auth_config, hasher),
            stats: stats::StatsService::new(repository),
        }
    }
}
