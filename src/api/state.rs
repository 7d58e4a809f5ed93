//! Application state - Dependency injection container.
//!
//! Provides handlers with access to every application service.

use std::sync::Arc;

use crate::services::{
    CatalogService, FavoriteService, LifecycleService, MenuService, NotificationService,
    OrderService, ReviewService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
///
/// Fields are trait objects so tests can swap any single service for a mock.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<dyn LifecycleService>,
    pub notifications: Arc<dyn NotificationService>,
    pub orders: Arc<dyn OrderService>,
    pub reviews: Arc<dyn ReviewService>,
    pub menus: Arc<dyn MenuService>,
    pub favorites: Arc<dyn FavoriteService>,
    pub catalog: Arc<dyn CatalogService>,
    pub users: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state from a service container.
    pub fn from_services(container: &dyn ServiceContainer) -> Self {
        Self {
            lifecycle: container.lifecycle(),
            notifications: container.notifications(),
            orders: container.orders(),
            reviews: container.reviews(),
            menus: container.menus(),
            favorites: container.favorites(),
            catalog: container.catalog(),
            users: container.users(),
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_services(&Services::in_memory())
    }
}
