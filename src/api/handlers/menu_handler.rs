//! Owner menu handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Caller, ValidatedJson};
use crate::api::AppState;
use crate::domain::{MenuItemChanges, MenuItemResponse, NewMenuItem};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddMenuItemRequest {
    #[validate(length(min = 1, message = "Menu item name is required"))]
    #[schema(example = "Spaghetti")]
    pub name: String,
    #[schema(example = "10.00")]
    pub price: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, message = "Menu item name must not be empty"))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants/:id/menu", get(get_menu).post(add_item))
        .route(
            "/restaurants/:id/menu/:item_id",
            put(update_item).delete(remove_item),
        )
}

/// Menu of a restaurant that has not been removed
#[utoipa::path(
    get,
    path = "/restaurants/{id}/menu",
    tag = "Menu",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Menu items", body = [MenuItemResponse]),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Restaurant removed")
    )
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuItemResponse>>>> {
    let menu = state.menus.menu(id).await?;
    Ok(Json(ApiResponse::success(
        menu.into_iter().map(MenuItemResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/restaurants/{id}/menu",
    tag = "Menu",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = AddMenuItemRequest,
    responses(
        (status = 201, description = "Item added", body = MenuItemResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not the owner")
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<AddMenuItemRequest>,
) -> AppResult<Created<MenuItemResponse>> {
    let item = NewMenuItem {
        name: payload.name,
        price: payload.price,
        description: payload.description,
        category: payload.category,
    };
    let item = state.menus.add_item(owner, id, item).await?;
    Ok(Created(MenuItemResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}/menu/{item_id}",
    tag = "Menu",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("item_id" = String, Path, description = "Menu item id")
    ),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Item updated", body = MenuItemResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Restaurant or item not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path((id, item_id)): Path<(String, String)>,
    ValidatedJson(payload): ValidatedJson<UpdateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItemResponse>>> {
    let changes = MenuItemChanges {
        name: payload.name,
        price: payload.price,
        description: payload.description,
        category: payload.category,
    };
    let item = state.menus.update_item(owner, id, item_id, changes).await?;
    Ok(Json(ApiResponse::success(MenuItemResponse::from(item))))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}/menu/{item_id}",
    tag = "Menu",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("item_id" = String, Path, description = "Menu item id")
    ),
    responses(
        (status = 200, description = "Item removed", body = MenuItemResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Restaurant or item not found")
    )
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<MenuItemResponse>>> {
    let item = state.menus.remove_item(owner, id, item_id).await?;
    Ok(Json(ApiResponse::with_message(
        MenuItemResponse::from(item),
        "Menu item removed",
    )))
}
