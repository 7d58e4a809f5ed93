//! Notification feed handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::domain::NotificationResponse;
use crate::errors::AppResult;
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// One page of the feed plus the user's unread total
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationFeed {
    pub data: Vec<NotificationResponse>,
    pub meta: PaginationMeta,
    pub unread: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub unread: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkedRead {
    pub marked: usize,
}

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:email/notifications", get(list_notifications))
        .route("/users/:email/notifications/unread-count", get(unread_count))
        .route("/users/:email/notifications/read-all", post(mark_all_read))
}

/// Newest-first notifications of a user
#[utoipa::path(
    get,
    path = "/users/{email}/notifications",
    tag = "Notifications",
    params(("email" = String, Path, description = "User email"), PaginationParams),
    responses((status = 200, description = "Notification page", body = NotificationFeed))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<NotificationFeed>>> {
    let feed = state.notifications.page_for(email, params).await?;

    let page = feed.page.map(NotificationResponse::from);
    Ok(Json(ApiResponse::success(NotificationFeed {
        data: page.data,
        meta: page.meta,
        unread: feed.unread,
    })))
}

#[utoipa::path(
    get,
    path = "/users/{email}/notifications/unread-count",
    tag = "Notifications",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "Unread count", body = UnreadCount))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    let unread = state.notifications.unread_count(email).await?;
    Ok(Json(ApiResponse::success(UnreadCount { unread })))
}

/// Mark every notification of the user read; safe to repeat
#[utoipa::path(
    post,
    path = "/users/{email}/notifications/read-all",
    tag = "Notifications",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "Number newly marked", body = MarkedRead))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<MarkedRead>>> {
    let marked = state.notifications.mark_all_read(email).await?;
    Ok(Json(ApiResponse::success(MarkedRead { marked })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Notification, NotificationKind};
    use crate::services::{FeedPage, MockNotificationService};
    use crate::types::Paginated;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_uses_page_and_unread_count() {
        let mut mock = MockNotificationService::new();
        mock.expect_page_for()
            .withf(|user, params| user == "c1@example.com" && params.page == 2)
            .times(1)
            .returning(|user, params| {
                let n = Notification::new(
                    &user,
                    NotificationKind::ReviewReply {
                        restaurant_id: "r1".into(),
                        restaurant_name: "Pasta House".into(),
                        reply: "Thanks!".into(),
                    },
                    Utc::now(),
                );
                Ok(FeedPage {
                    page: Paginated::new(vec![n], params.page, params.limit(), 3),
                    unread: 3,
                })
            });
        mock.expect_unread_count().never();

        let mut state = AppState::in_memory();
        state.notifications = Arc::new(mock);
        let app = notification_routes().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/c1@example.com/notifications?page=2&per_page=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["unread"], 3);
        assert_eq!(json["data"]["meta"]["total_pages"], 3);
        assert_eq!(json["data"]["data"][0]["type"], "review-reply");
    }
}
