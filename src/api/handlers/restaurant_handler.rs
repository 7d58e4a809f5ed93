//! Customer browse and owner submission handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::extractors::Caller;
use crate::api::AppState;
use crate::domain::{NewRestaurant, Restaurant, RestaurantResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Browse filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BrowseQuery {
    /// Category to filter by; `all` or absent means no filter
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(browse).post(submit))
        .route("/restaurants/:id", get(get_restaurant))
        .route("/restaurants/:id/active", post(set_active))
        .route("/owners/:email/restaurants", get(owner_restaurants))
}

fn respond(restaurants: Vec<Restaurant>) -> Json<ApiResponse<Vec<RestaurantResponse>>> {
    Json(ApiResponse::success(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// Browse visible restaurants
#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "Restaurants",
    params(BrowseQuery),
    responses((status = 200, description = "Visible restaurants", body = [RestaurantResponse]))
)]
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    Ok(respond(state.catalog.browse(query.category).await?))
}

/// Submit a restaurant for approval; the caller becomes its owner
#[utoipa::path(
    post,
    path = "/restaurants",
    tag = "Restaurants",
    request_body = NewRestaurant,
    responses(
        (status = 201, description = "Submitted, pending approval", body = RestaurantResponse),
        (status = 400, description = "Missing name, location or caller"),
        (status = 403, description = "Caller is registered but not an owner")
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Json(details): Json<NewRestaurant>,
) -> AppResult<Created<RestaurantResponse>> {
    let restaurant = state.lifecycle.submit(owner, details).await?;
    Ok(Created(RestaurantResponse::from(restaurant)))
}

/// Get a visible restaurant
#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant", body = RestaurantResponse),
        (status = 404, description = "Unknown or not visible")
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RestaurantResponse>>> {
    let restaurant = state.catalog.restaurant(id).await?;
    Ok(Json(ApiResponse::success(RestaurantResponse::from(restaurant))))
}

/// Pause or resume an approved restaurant
#[utoipa::path(
    post,
    path = "/restaurants/{id}/active",
    tag = "Restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated", body = RestaurantResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 409, description = "Restaurant is not approved")
    )
)]
pub async fn set_active(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(payload): Json<SetActiveRequest>,
) -> AppResult<Json<ApiResponse<RestaurantResponse>>> {
    let restaurant = state.lifecycle.set_active(owner, id, payload.active).await?;
    Ok(Json(ApiResponse::success(RestaurantResponse::from(restaurant))))
}

/// Owner dashboard: submissions that have not been removed
#[utoipa::path(
    get,
    path = "/owners/{email}/restaurants",
    tag = "Restaurants",
    params(("email" = String, Path, description = "Owner email")),
    responses((status = 200, description = "Owner's restaurants", body = [RestaurantResponse]))
)]
pub async fn owner_restaurants(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    Ok(respond(state.catalog.owner_restaurants(email).await?))
}
