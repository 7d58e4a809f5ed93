//! Domain layer - Core business entities and logic
//!
//! Restaurants own their menu, reviews and orders. Users, favorites and
//! notifications are top-level collections that refer to restaurants by id.

pub mod menu;
pub mod notification;
pub mod order;
pub mod restaurant;
pub mod review;
pub mod user;

pub use menu::{MenuItem, MenuItemChanges, MenuItemResponse, NewMenuItem};
pub use notification::{ApprovalStatus, Notification, NotificationKind, NotificationResponse};
pub use order::{Order, OrderItem, OrderItemResponse, OrderLine, OrderResponse, OrderStatus};
pub use restaurant::{NewRestaurant, Restaurant, RestaurantResponse, RestaurantStatus};
pub use review::{Review, ReviewResponse};
pub use user::{User, UserResponse, UserRole};
