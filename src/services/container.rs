//! Service Container - Centralized service access with parallel execution support.
//!
//! Every service shares one Unit of Work, so a cascade started by one service
//! is visible to all others as soon as its transaction commits.

use std::future::Future;
use std::sync::Arc;

use super::{
    Catalog, CatalogService, FavoriteService, FavoritesManager, LifecycleManager,
    LifecycleService, MenuManager, MenuService, NotificationCenter, NotificationService,
    OrderLedger, OrderService, ReviewBoard, ReviewService, UserManager, UserService,
};
use crate::errors::AppResult;
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn lifecycle(&self) -> Arc<dyn LifecycleService>;

    fn notifications(&self) -> Arc<dyn NotificationService>;

    fn orders(&self) -> Arc<dyn OrderService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn menus(&self) -> Arc<dyn MenuService>;

    fn favorites(&self) -> Arc<dyn FavoriteService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    lifecycle: Arc<dyn LifecycleService>,
    notifications: Arc<dyn NotificationService>,
    orders: Arc<dyn OrderService>,
    reviews: Arc<dyn ReviewService>,
    menus: Arc<dyn MenuService>,
    favorites: Arc<dyn FavoriteService>,
    catalog: Arc<dyn CatalogService>,
    users: Arc<dyn UserService>,
}

impl Services {
    /// Wire every service onto one shared store
    pub fn new<U: UnitOfWork + 'static>(uow: Arc<U>) -> Self {
        Self {
            lifecycle: Arc::new(LifecycleManager::new(uow.clone())),
            notifications: Arc::new(NotificationCenter::new(uow.clone())),
            orders: Arc::new(OrderLedger::new(uow.clone())),
            reviews: Arc::new(ReviewBoard::new(uow.clone())),
            menus: Arc::new(MenuManager::new(uow.clone())),
            favorites: Arc::new(FavoritesManager::new(uow.clone())),
            catalog: Arc::new(Catalog::new(uow.clone())),
            users: Arc::new(UserManager::new(uow)),
        }
    }

    /// Services over a fresh, unpersisted store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(Persistence::in_memory()))
    }
}

impl ServiceContainer for Services {
    fn lifecycle(&self) -> Arc<dyn LifecycleService> {
        self.lifecycle.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notifications.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.orders.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.reviews.clone()
    }

    fn menus(&self) -> Arc<dyn MenuService> {
        self.menus.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteService> {
        self.favorites.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;

    /// Run every operation and collect the results in input order.
    ///
    /// Does not short-circuit: every future runs to completion and each
    /// outcome is reported.
    pub async fn settle_all<F, T>(futures: Vec<F>) -> Vec<AppResult<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        futures::future::join_all(futures).await
    }
}
