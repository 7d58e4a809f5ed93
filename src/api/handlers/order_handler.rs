//! Order placement and history handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::Caller;
use crate::api::AppState;
use crate::domain::{Order, OrderLine, OrderResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLine>,
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants/:id/orders", get(history).post(place))
        .route(
            "/restaurants/:id/orders/:order_id/complete",
            post(complete),
        )
        .route("/customers/:email/orders", get(customer_orders))
}

fn respond(orders: Vec<Order>) -> Json<ApiResponse<Vec<OrderResponse>>> {
    Json(ApiResponse::success(
        orders.into_iter().map(OrderResponse::from).collect(),
    ))
}

/// Orders of a restaurant, newest first
#[utoipa::path(
    get,
    path = "/restaurants/{id}/orders",
    tag = "Orders",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Order history", body = [OrderResponse]),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<OrderResponse>>>> {
    Ok(respond(state.orders.history_for(id).await?))
}

/// Place an order as the calling customer
#[utoipa::path(
    post,
    path = "/restaurants/{id}/orders",
    tag = "Orders",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Empty order, bad quantity or unknown item"),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Restaurant not open to customers")
    )
)]
pub async fn place(
    State(state): State<AppState>,
    Caller(customer): Caller,
    Path(id): Path<String>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Created<OrderResponse>> {
    let order = state.orders.place(id, customer, payload.items).await?;
    Ok(Created(OrderResponse::from(order)))
}

#[utoipa::path(
    post,
    path = "/restaurants/{id}/orders/{order_id}/complete",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("order_id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order completed", body = OrderResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 409, description = "Order is not pending")
    )
)]
pub async fn complete(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path((id, order_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<OrderResponse>>> {
    let order = state.orders.complete(owner, id, order_id).await?;
    Ok(Json(ApiResponse::success(OrderResponse::from(order))))
}

#[utoipa::path(
    get,
    path = "/customers/{email}/orders",
    tag = "Orders",
    params(("email" = String, Path, description = "Customer email")),
    responses((status = 200, description = "Customer's orders", body = [OrderResponse]))
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<OrderResponse>>>> {
    Ok(respond(state.orders.orders_for_customer(email).await?))
}
