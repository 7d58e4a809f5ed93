//! User service - user registry.
//!
//! Orchestrates domain operations via Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; duplicate emails are a conflict
    async fn register(&self, email: String, password: String, role: UserRole) -> AppResult<User>;

    /// Get user by email
    async fn get_user(&self, email: String) -> AppResult<User>;

    /// List all registered users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, email: String, password: String, role: UserRole) -> AppResult<User> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if (password.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let user = self
            .uow
            .transaction(move |data| {
                if data.user(&email).is_some() {
                    return Err(AppError::conflict(format!("User {}", email)));
                }
                let user = User::new(email, password, role);
                data.users.push(user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(email = %user.email, role = %user.role, "User registered");
        Ok(user)
    }

    async fn get_user(&self, email: String) -> AppResult<User> {
        self.uow
            .read(move |data| data.user(&email).cloned().ok_or_not_found("User"))
            .await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.read(|data| Ok(data.users.clone())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Persistence;

    fn manager() -> UserManager<Persistence> {
        UserManager::new(Arc::new(Persistence::in_memory()))
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let users = manager();
        let user = users
            .register(" owner@example.com ".into(), "password1".into(), UserRole::Owner)
            .await
            .unwrap();

        assert_eq!(user.email, "owner@example.com");
        let found = users.get_user("owner@example.com".into()).await.unwrap();
        assert_eq!(found.role, UserRole::Owner);
        assert_eq!(users.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let users = manager();
        users
            .register("c@example.com".into(), "password1".into(), UserRole::Customer)
            .await
            .unwrap();

        let again = users
            .register("c@example.com".into(), "password2".into(), UserRole::Owner)
            .await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_short_password_and_unknown_user() {
        let users = manager();
        let short = users
            .register("c@example.com".into(), "short".into(), UserRole::Customer)
            .await;
        assert!(matches!(short, Err(AppError::Validation(_))));

        let missing = users.get_user("nobody@example.com".into()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
