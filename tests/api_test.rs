//! Integration tests for API endpoints.
//!
//! These drive the full router over an in-memory store, the same wiring the
//! server uses, so middleware, extractors and the error envelope are covered.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use restaurant_hub::api::{create_router, AppState};
use restaurant_hub::config::CALLER_HEADER;

const ADMIN: &str = "admin@example.com";
const OWNER: &str = "o1@example.com";
const CUSTOMER: &str = "c1@example.com";

// =============================================================================
// Helpers
// =============================================================================

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self {
            router: create_router(AppState::in_memory()),
        }
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        caller: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            builder = builder.header(CALLER_HEADER, caller);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None, None).await
    }

    async fn post(&self, uri: &str, caller: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, caller, Some(body)).await
    }

    async fn register(&self, email: &str, role: &str) {
        let (status, _) = self
            .post(
                "/users",
                None,
                json!({ "email": email, "password": "password1", "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    /// Submit Pasta House as OWNER and return its id
    async fn submit_pasta_house(&self) -> String {
        let (status, body) = self
            .post(
                "/restaurants",
                Some(OWNER),
                json!({
                    "name": "Pasta House",
                    "location": "12 Main Street",
                    "categories": ["italian"]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Admin + owner registered, Pasta House approved with one $10.00 item
    async fn with_open_restaurant() -> (Self, String, String) {
        let app = Self::new();
        app.register(ADMIN, "admin").await;
        app.register(OWNER, "owner").await;
        let id = app.submit_pasta_house().await;

        let (status, item) = app
            .post(
                &format!("/restaurants/{}/menu", id),
                Some(OWNER),
                json!({ "name": "Spaghetti", "price": "10.00" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let item_id = item["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .post(
                &format!("/admin/restaurants/{}/approve", id),
                Some(ADMIN),
                json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        (app, id, item_id)
    }
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// =============================================================================
// Health & users
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_and_fetch_user() {
    let app = TestApp::new();
    app.register(OWNER, "owner").await;

    let (status, body) = app.get(&format!("/users/{}", OWNER)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], OWNER);
    assert_eq!(body["data"]["role"], "owner");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_rejects_bad_input_and_duplicates() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/users",
            None,
            json!({ "email": "not-an-email", "password": "password1", "role": "customer" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    app.register(CUSTOMER, "customer").await;
    let (status, body) = app
        .post(
            "/users",
            None,
            json!({ "email": CUSTOMER, "password": "password1", "role": "customer" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "CONFLICT");
}

// =============================================================================
// Lifecycle over HTTP
// =============================================================================

#[tokio::test]
async fn test_submit_requires_caller_header() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/restaurants",
            None,
            json!({ "name": "Pasta House", "location": "12 Main Street" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_pending_restaurant_is_not_browsable() {
    let app = TestApp::new();
    let id = app.submit_pasta_house().await;

    let (status, body) = app.get("/restaurants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, body) = app.get(&format!("/restaurants/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_admin_routes_require_admin_caller() {
    let app = TestApp::new();
    app.register(CUSTOMER, "customer").await;
    let id = app.submit_pasta_house().await;
    let approve = format!("/admin/restaurants/{}/approve", id);

    // Unknown caller
    let (status, body) = app.post(&approve, Some("stranger@example.com"), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");

    // Registered, but not an admin
    let (status, _) = app.post(&approve, Some(CUSTOMER), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // No caller at all
    let (status, _) = app.call(Method::GET, "/admin/restaurants/pending", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approval_opens_restaurant_to_customers() {
    let (app, id, item_id) = TestApp::with_open_restaurant().await;

    let (status, body) = app.get("/restaurants?category=Italian").await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["status"], "approved");

    let (status, body) = app
        .post(
            &format!("/restaurants/{}/orders", id),
            Some(CUSTOMER),
            json!({ "items": [{ "item_id": item_id, "quantity": 2 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total"], "20.00");
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = app
        .get(&format!("/users/{}/notifications/unread-count", OWNER))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["unread"], 2);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let (app, id, _) = TestApp::with_open_restaurant().await;

    let (status, body) = app
        .post(
            &format!("/restaurants/{}/orders", id),
            Some(CUSTOMER),
            json!({ "items": [] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "EMPTY_ORDER");
}

#[tokio::test]
async fn test_reject_requires_reason_and_deletes() {
    let app = TestApp::new();
    app.register(ADMIN, "admin").await;
    let id = app.submit_pasta_house().await;
    let reject = format!("/admin/restaurants/{}/reject", id);

    let (status, _) = app.post(&reject, Some(ADMIN), json!({ "reason": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&reject, Some(ADMIN), json!({ "reason": "incomplete info" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .call(Method::GET, "/admin/restaurants/pending", Some(ADMIN), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Second rejection: the record is gone
    let (status, _) = app
        .post(&reject, Some(ADMIN), json!({ "reason": "incomplete info" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_reports_cascade_and_blocks_reviews() {
    let (app, id, item_id) = TestApp::with_open_restaurant().await;

    app.post(
        &format!("/users/{}/favorites", CUSTOMER),
        None,
        json!({ "restaurant_id": id }),
    )
    .await;
    app.post(
        &format!("/restaurants/{}/orders", id),
        Some(CUSTOMER),
        json!({ "items": [{ "item_id": item_id, "quantity": 1 }] }),
    )
    .await;

    let (status, body) = app
        .post(
            &format!("/admin/restaurants/{}/remove", id),
            Some(ADMIN),
            json!({ "reason": "health code violation" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorites_pruned"], 1);
    assert_eq!(body["data"]["orders_cancelled"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["restaurant"]["removed"], true);

    let (status, body) = app
        .post(
            &format!("/restaurants/{}/reviews", id),
            Some(CUSTOMER),
            json!({ "text": "Where did it go?" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "INVALID_STATE");

    let (_, body) = app.get(&format!("/users/{}/favorites", CUSTOMER)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_lists_users() {
    let app = TestApp::new();
    app.register(ADMIN, "admin").await;
    app.register(OWNER, "owner").await;

    let (status, body) = app.call(Method::GET, "/admin/users", Some(ADMIN), None).await;

    assert_eq!(status, StatusCode::OK);
    let emails: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect();
    assert!(emails.contains(&ADMIN.to_string()));
    assert!(emails.contains(&OWNER.to_string()));
}
