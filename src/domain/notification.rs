//! Notifications addressed to a single user.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::menu::format_price;

/// Outcome reported by a `restaurant-approval` notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Approved,
    Rejected,
    Removed,
}

/// Notification type with its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NotificationKind {
    #[serde(rename_all = "camelCase")]
    RestaurantApproval {
        restaurant_id: String,
        restaurant_name: String,
        status: ApprovalStatus,
        reason: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    NewOrder {
        restaurant_id: String,
        restaurant_name: String,
        order_id: String,
        total: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    ReviewReply {
        restaurant_id: String,
        restaurant_name: String,
        reply: String,
    },
    #[serde(rename_all = "camelCase")]
    NewReview {
        restaurant_id: String,
        restaurant_name: String,
        author: String,
        #[serde(default)]
        review_text: String,
    },
}

impl NotificationKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NotificationKind::RestaurantApproval { .. } => "restaurant-approval",
            NotificationKind::NewOrder { .. } => "new-order",
            NotificationKind::ReviewReply { .. } => "review-reply",
            NotificationKind::NewReview { .. } => "new-review",
        }
    }

    pub fn restaurant_id(&self) -> &str {
        match self {
            NotificationKind::RestaurantApproval { restaurant_id, .. }
            | NotificationKind::NewOrder { restaurant_id, .. }
            | NotificationKind::ReviewReply { restaurant_id, .. }
            | NotificationKind::NewReview { restaurant_id, .. } => restaurant_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: String,
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(recipient: &str, kind: NotificationKind, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.to_string(),
            kind,
            date: now,
            read: false,
        }
    }
}

/// Flat notification view for API clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    #[schema(example = "restaurant-approval")]
    #[serde(rename = "type")]
    pub kind: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    pub date: DateTime<Utc>,
    pub read: bool,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        let mut out = Self {
            id: n.id,
            kind: n.kind.type_name().to_string(),
            restaurant_id: String::new(),
            restaurant_name: String::new(),
            status: None,
            reason: None,
            order_id: None,
            total: None,
            reply: None,
            author: None,
            review_text: None,
            date: n.date,
            read: n.read,
        };

        match n.kind {
            NotificationKind::RestaurantApproval {
                restaurant_id,
                restaurant_name,
                status,
                reason,
            } => {
                out.restaurant_id = restaurant_id;
                out.restaurant_name = restaurant_name;
                out.status = Some(status);
                out.reason = reason;
            }
            NotificationKind::NewOrder {
                restaurant_id,
                restaurant_name,
                order_id,
                total,
            } => {
                out.restaurant_id = restaurant_id;
                out.restaurant_name = restaurant_name;
                out.order_id = Some(order_id);
                out.total = Some(format_price(total));
            }
            NotificationKind::ReviewReply {
                restaurant_id,
                restaurant_name,
                reply,
            } => {
                out.restaurant_id = restaurant_id;
                out.restaurant_name = restaurant_name;
                out.reply = Some(reply);
            }
            NotificationKind::NewReview {
                restaurant_id,
                restaurant_name,
                author,
                review_text,
            } => {
                out.restaurant_id = restaurant_id;
                out.restaurant_name = restaurant_name;
                out.author = Some(author);
                out.review_text = Some(review_text);
            }
        }
        out
    }
}
