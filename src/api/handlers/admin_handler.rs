//! Admin moderation handlers. Mounted behind the admin middleware.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Restaurant, RestaurantResponse, UserResponse};
use crate::errors::AppResult;
use crate::services::RemovalReport;
use crate::types::ApiResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReasonRequest {
    #[validate(length(min = 1, message = "A reason is required"))]
    #[schema(example = "Incomplete information")]
    pub reason: String,
}

/// Removal outcome with cascade counts
#[derive(Debug, Serialize, ToSchema)]
pub struct RemovalResponse {
    pub restaurant: RestaurantResponse,
    pub favorites_pruned: usize,
    pub orders_cancelled: Vec<String>,
    pub owners_updated: usize,
    pub reviews_hidden: usize,
}

impl From<RemovalReport> for RemovalResponse {
    fn from(report: RemovalReport) -> Self {
        Self {
            restaurant: RestaurantResponse::from(report.restaurant),
            favorites_pruned: report.favorites_pruned,
            orders_cancelled: report.orders_cancelled,
            owners_updated: report.owners_updated,
            reviews_hidden: report.reviews_hidden,
        }
    }
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/restaurants/pending", get(pending))
        .route("/admin/restaurants/approved", get(approved))
        .route("/admin/restaurants/:id/approve", post(approve))
        .route("/admin/restaurants/:id/reject", post(reject))
        .route("/admin/restaurants/:id/remove", post(remove))
        .route("/admin/users", get(list_users))
}

fn respond(restaurants: Vec<Restaurant>) -> Json<ApiResponse<Vec<RestaurantResponse>>> {
    Json(ApiResponse::success(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// Pending queue, oldest submission first
#[utoipa::path(
    get,
    path = "/admin/restaurants/pending",
    tag = "Admin",
    responses(
        (status = 200, description = "Pending restaurants", body = [RestaurantResponse]),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn pending(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    Ok(respond(state.catalog.pending().await?))
}

/// Approval history, excluding removed restaurants
#[utoipa::path(
    get,
    path = "/admin/restaurants/approved",
    tag = "Admin",
    responses(
        (status = 200, description = "Approved restaurants", body = [RestaurantResponse]),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn approved(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    Ok(respond(state.catalog.approved().await?))
}

#[utoipa::path(
    post,
    path = "/admin/restaurants/{id}/approve",
    tag = "Admin",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Approved", body = RestaurantResponse),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Restaurant is not pending")
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RestaurantResponse>>> {
    let restaurant = state.lifecycle.approve(id).await?;
    Ok(Json(ApiResponse::with_message(
        RestaurantResponse::from(restaurant),
        "Restaurant approved",
    )))
}

/// Reject and delete a pending restaurant
#[utoipa::path(
    post,
    path = "/admin/restaurants/{id}/reject",
    tag = "Admin",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = ReasonRequest,
    responses(
        (status = 200, description = "Rejected and deleted", body = RestaurantResponse),
        (status = 400, description = "Missing reason"),
        (status = 409, description = "Restaurant is not pending")
    )
)]
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ReasonRequest>,
) -> AppResult<Json<ApiResponse<RestaurantResponse>>> {
    let restaurant = state.lifecycle.reject(id, payload.reason).await?;
    Ok(Json(ApiResponse::with_message(
        RestaurantResponse::from(restaurant),
        "Restaurant rejected",
    )))
}

/// Remove an approved restaurant and run the cascade
#[utoipa::path(
    post,
    path = "/admin/restaurants/{id}/remove",
    tag = "Admin",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = ReasonRequest,
    responses(
        (status = 200, description = "Removed", body = RemovalResponse),
        (status = 400, description = "Missing reason"),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "Restaurant is not approved")
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ReasonRequest>,
) -> AppResult<Json<ApiResponse<RemovalResponse>>> {
    let report = state.lifecycle.remove(id, payload.reason).await?;
    Ok(Json(ApiResponse::with_message(
        RemovalResponse::from(report),
        "Restaurant removed from platform",
    )))
}

/// Every registered user
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "Registered users", body = [UserResponse]),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.users.list_users().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}
