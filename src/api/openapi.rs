//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, favorites_handler, menu_handler, notification_handler, order_handler,
    restaurant_handler, review_handler, user_handler,
};
use crate::config::CALLER_HEADER;
use crate::domain::{
    ApprovalStatus, MenuItemResponse, NewRestaurant, NotificationResponse, OrderItemResponse,
    OrderLine, OrderResponse, OrderStatus, RestaurantResponse, RestaurantStatus, ReviewResponse,
    UserResponse, UserRole,
};
use crate::types::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restaurant Hub",
        version = "0.1.0",
        description = "Restaurant marketplace: lifecycle moderation, menus, orders, reviews and notifications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::register,
        user_handler::get_user,
        restaurant_handler::browse,
        restaurant_handler::submit,
        restaurant_handler::get_restaurant,
        restaurant_handler::set_active,
        restaurant_handler::owner_restaurants,
        menu_handler::get_menu,
        menu_handler::add_item,
        menu_handler::update_item,
        menu_handler::remove_item,
        order_handler::history,
        order_handler::place,
        order_handler::complete,
        order_handler::customer_orders,
        review_handler::list_reviews,
        review_handler::add_review,
        review_handler::reply,
        favorites_handler::list_favorites,
        favorites_handler::add_favorite,
        favorites_handler::remove_favorite,
        notification_handler::list_notifications,
        notification_handler::unread_count,
        notification_handler::mark_all_read,
        admin_handler::pending,
        admin_handler::approved,
        admin_handler::approve,
        admin_handler::reject,
        admin_handler::remove,
        admin_handler::list_users,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            NewRestaurant,
            RestaurantStatus,
            RestaurantResponse,
            MenuItemResponse,
            OrderLine,
            OrderStatus,
            OrderItemResponse,
            OrderResponse,
            ReviewResponse,
            ApprovalStatus,
            NotificationResponse,
            PaginationMeta,
            // Request and response bodies
            user_handler::RegisterRequest,
            restaurant_handler::SetActiveRequest,
            menu_handler::AddMenuItemRequest,
            menu_handler::UpdateMenuItemRequest,
            order_handler::PlaceOrderRequest,
            review_handler::ReviewTextRequest,
            favorites_handler::FavoriteRequest,
            favorites_handler::FavoriteChange,
            notification_handler::NotificationFeed,
            notification_handler::UnreadCount,
            notification_handler::MarkedRead,
            admin_handler::ReasonRequest,
            admin_handler::RemovalResponse,
        )
    ),
    modifiers(&CallerAddon),
    tags(
        (name = "Users", description = "User registry"),
        (name = "Restaurants", description = "Browsing and owner submissions"),
        (name = "Menu", description = "Owner menu management"),
        (name = "Orders", description = "Order placement and history"),
        (name = "Reviews", description = "Reviews and owner replies"),
        (name = "Favorites", description = "Customer favorites"),
        (name = "Notifications", description = "Per-user notification feed"),
        (name = "Admin", description = "Restaurant moderation")
    )
)]
pub struct ApiDoc;

/// Documents the caller header used by owner, customer and admin actions
struct CallerAddon;

impl Modify for CallerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "caller",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    CALLER_HEADER,
                    "Email of the acting user",
                ))),
            );
        }
    }
}
