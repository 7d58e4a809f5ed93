//! HTTP request handlers.

pub mod admin_handler;
pub mod favorites_handler;
pub mod menu_handler;
pub mod notification_handler;
pub mod order_handler;
pub mod restaurant_handler;
pub mod review_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use favorites_handler::favorites_routes;
pub use menu_handler::menu_routes;
pub use notification_handler::notification_routes;
pub use order_handler::order_routes;
pub use restaurant_handler::restaurant_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;
