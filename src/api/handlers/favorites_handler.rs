use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::domain::RestaurantResponse;
use crate::errors::AppResult;
use crate::types::ApiResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub restaurant_id: String,
}

/// Whether a favorites call changed anything
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteChange {
    pub restaurant_id: String,
    pub changed: bool,
}

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:email/favorites",
            get(list_favorites).post(add_favorite),
        )
        .route(
            "/users/:email/favorites/:restaurant_id",
            delete(remove_favorite),
        )
}

/// Favorite restaurants that are still visible
#[utoipa::path(
    get,
    path = "/users/{email}/favorites",
    tag = "Favorites",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "Favorites", body = [RestaurantResponse]))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    let favorites = state.favorites.list(email).await?;
    Ok(Json(ApiResponse::success(
        favorites.into_iter().map(RestaurantResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/users/{email}/favorites",
    tag = "Favorites",
    params(("email" = String, Path, description = "User email")),
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite stored", body = FavoriteChange),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Restaurant not open to customers")
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<FavoriteRequest>,
) -> AppResult<Json<ApiResponse<FavoriteChange>>> {
    let changed = state
        .favorites
        .add(email, payload.restaurant_id.clone())
        .await?;

    Ok(Json(ApiResponse::success(FavoriteChange {
        restaurant_id: payload.restaurant_id,
        changed,
    })))
}

#[utoipa::path(
    delete,
    path = "/users/{email}/favorites/{restaurant_id}",
    tag = "Favorites",
    params(
        ("email" = String, Path, description = "User email"),
        ("restaurant_id" = String, Path, description = "Restaurant id")
    ),
    responses((status = 200, description = "Favorite dropped", body = FavoriteChange))
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((email, restaurant_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<FavoriteChange>>> {
    let changed = state.favorites.remove(email, restaurant_id.clone()).await?;
    Ok(Json(ApiResponse::success(FavoriteChange {
        restaurant_id,
        changed,
    })))
}
