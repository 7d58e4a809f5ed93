//! Review and reply handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Caller, ValidatedJson};
use crate::api::AppState;
use crate::domain::ReviewResponse;
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewTextRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    #[schema(example = "Great pasta")]
    pub text: String,
}

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants/:id/reviews", get(list_reviews).post(add_review))
        .route("/restaurants/:id/reviews/:index/reply", post(reply))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}/reviews",
    tag = "Reviews",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Visible reviews, oldest first", body = [ReviewResponse]),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ReviewResponse>>>> {
    let reviews = state.reviews.visible_reviews(id).await?;
    Ok(Json(ApiResponse::success(
        reviews
            .into_iter()
            .map(|(index, review)| ReviewResponse::new(index, review))
            .collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/restaurants/{id}/reviews",
    tag = "Reviews",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = ReviewTextRequest,
    responses(
        (status = 201, description = "Review added", body = ReviewResponse),
        (status = 409, description = "Restaurant not open to customers")
    )
)]
pub async fn add_review(
    State(state): State<AppState>,
    Caller(author): Caller,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ReviewTextRequest>,
) -> AppResult<Created<ReviewResponse>> {
    let (index, review) = state.reviews.add_review(id, author, payload.text).await?;
    Ok(Created(ReviewResponse::new(index, review)))
}

/// Owner reply to one review
#[utoipa::path(
    post,
    path = "/restaurants/{id}/reviews/{index}/reply",
    tag = "Reviews",
    params(
        ("id" = String, Path, description = "Restaurant id"),
        ("index" = usize, Path, description = "Review index")
    ),
    request_body = ReviewTextRequest,
    responses(
        (status = 200, description = "Reply stored", body = ReviewResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Review not found"),
        (status = 409, description = "Review already has a reply")
    )
)]
pub async fn reply(
    State(state): State<AppState>,
    Caller(owner): Caller,
    Path((id, index)): Path<(String, usize)>,
    ValidatedJson(payload): ValidatedJson<ReviewTextRequest>,
) -> AppResult<Json<ApiResponse<ReviewResponse>>> {
    let review = state.reviews.reply(id, index, owner, payload.text).await?;
    Ok(Json(ApiResponse::success(ReviewResponse::new(index, review))))
}
