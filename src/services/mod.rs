//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work pattern: every mutating operation,
//! including its cascades, is one atomic transaction over the store.

mod catalog_service;
pub mod container;
mod favorites_service;
mod lifecycle_service;
mod menu_service;
mod notification_service;
mod order_service;
mod review_service;
mod user_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use catalog_service::{Catalog, CatalogService};
pub use favorites_service::{FavoriteService, FavoritesManager};
pub use lifecycle_service::{LifecycleManager, LifecycleService, RemovalReport};
pub use menu_service::{MenuManager, MenuService};
pub use notification_service::{FeedPage, NotificationCenter, NotificationService};
pub use order_service::{OrderLedger, OrderService};
pub use review_service::{ReviewBoard, ReviewService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use favorites_service::MockFavoriteService;
#[cfg(any(test, feature = "test-utils"))]
pub use lifecycle_service::MockLifecycleService;
#[cfg(any(test, feature = "test-utils"))]
pub use menu_service::MockMenuService;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_service::MockNotificationService;
#[cfg(any(test, feature = "test-utils"))]
pub use order_service::MockOrderService;
#[cfg(any(test, feature = "test-utils"))]
pub use review_service::MockReviewService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
