//! Restaurant aggregate.
//!
//! A restaurant owns its menu, reviews and orders. Its lifecycle is
//! `pending -> approved -> removed`; rejection deletes the record instead of
//! flagging it, so `Rejected` only ever appears in notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{MenuItem, MenuItemResponse, Order, Review};
use crate::config::CATEGORY_ALL;
use crate::errors::{AppError, AppResult};

/// Lifecycle status of a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    Pending,
    Approved,
    Rejected,
    Removed,
}

impl std::fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RestaurantStatus::Pending => "pending",
            RestaurantStatus::Approved => "approved",
            RestaurantStatus::Rejected => "rejected",
            RestaurantStatus::Removed => "removed",
        };
        f.write_str(s)
    }
}

/// Details an owner provides when submitting a restaurant
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewRestaurant {
    #[schema(example = "Pasta House")]
    pub name: String,
    #[schema(example = "12 Main Street")]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = json!(["italian", "pasta"]))]
    pub categories: Vec<String>,
}

/// Restaurant aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub categories: Vec<String>,
    pub owner: String,
    pub status: RestaurantStatus,
    /// Soft visibility; only meaningful while approved
    pub active: bool,
    pub date_submitted: DateTime<Utc>,
    pub approval_date: Option<DateTime<Utc>>,
    pub removal_date: Option<DateTime<Utc>>,
    pub removal_reason: Option<String>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Restaurant {
    /// Build a pending restaurant from an owner's submission.
    pub fn submit(owner: &str, details: NewRestaurant, now: DateTime<Utc>) -> AppResult<Self> {
        let owner = owner.trim();
        let name = details.name.trim();
        let location = details.location.trim();

        if owner.is_empty() {
            return Err(AppError::validation("Owner is required"));
        }
        if name.is_empty() {
            return Err(AppError::validation("Restaurant name is required"));
        }
        if location.is_empty() {
            return Err(AppError::validation("Restaurant location is required"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            location: location.to_string(),
            description: details.description.trim().to_string(),
            categories: normalize_categories(details.categories),
            owner: owner.to_string(),
            status: RestaurantStatus::Pending,
            active: false,
            date_submitted: now,
            approval_date: None,
            removal_date: None,
            removal_reason: None,
            menu: Vec::new(),
            reviews: Vec::new(),
            orders: Vec::new(),
        })
    }

    /// Whether customers may see this restaurant.
    pub fn is_visible(&self) -> bool {
        self.status == RestaurantStatus::Approved && self.active
    }

    pub fn is_removed(&self) -> bool {
        self.status == RestaurantStatus::Removed
    }

    pub fn is_pending(&self) -> bool {
        self.status == RestaurantStatus::Pending
    }

    pub fn is_owned_by(&self, user: &str) -> bool {
        self.owner == user
    }

    /// Case-insensitive category match; `all` matches everything.
    pub fn has_category(&self, category: &str) -> bool {
        category.eq_ignore_ascii_case(CATEGORY_ALL)
            || self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category))
    }

    pub fn ensure_owner(&self, user: &str) -> AppResult<()> {
        if self.is_owned_by(user) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "{} is not the owner of this restaurant",
                user
            )))
        }
    }

    pub fn ensure_visible(&self) -> AppResult<()> {
        if self.is_visible() {
            Ok(())
        } else {
            Err(AppError::invalid_state(format!(
                "Restaurant is not open to customers (status: {})",
                self.status
            )))
        }
    }

    pub fn ensure_pending(&self) -> AppResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(AppError::invalid_state(format!(
                "Restaurant is {}, expected pending",
                self.status
            )))
        }
    }

    pub fn ensure_not_removed(&self) -> AppResult<()> {
        if self.is_removed() {
            Err(AppError::invalid_state("Restaurant has been removed"))
        } else {
            Ok(())
        }
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_pending()?;
        self.status = RestaurantStatus::Approved;
        self.approval_date = Some(now);
        self.active = true;
        Ok(())
    }

    /// Flip the record to removed. Cascades are applied by the caller.
    pub fn remove(&mut self, reason: &str, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != RestaurantStatus::Approved {
            return Err(AppError::invalid_state(format!(
                "Restaurant is {}, only approved restaurants can be removed",
                self.status
            )));
        }
        self.status = RestaurantStatus::Removed;
        self.active = false;
        self.removal_date = Some(now);
        self.removal_reason = Some(reason.to_string());
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) -> AppResult<()> {
        if self.status != RestaurantStatus::Approved {
            return Err(AppError::invalid_state(format!(
                "Restaurant is {}, only approved restaurants can be paused or resumed",
                self.status
            )));
        }
        self.active = active;
        Ok(())
    }

    /// Cancel every pending order. Returns the ids of the cancelled orders.
    pub fn cancel_pending_orders(&mut self, reason: &str) -> Vec<String> {
        self.orders
            .iter_mut()
            .filter_map(|order| order.cancel(reason).then(|| order.id.clone()))
            .collect()
    }

    /// Hide every review. Returns the number of reviews newly hidden.
    pub fn archive_reviews(&mut self) -> usize {
        let mut hidden = 0;
        for review in self.reviews.iter_mut().filter(|review| !review.hidden) {
            review.hidden = true;
            hidden += 1;
        }
        hidden
    }
}

fn normalize_categories(categories: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.trim().to_lowercase();
        if !category.is_empty() && !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

/// Restaurant as returned to API clients (orders and reviews are served by
/// their own endpoints)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: String,
    #[schema(example = "Pasta House")]
    pub name: String,
    pub location: String,
    pub description: String,
    pub categories: Vec<String>,
    pub owner: String,
    pub status: RestaurantStatus,
    pub active: bool,
    pub removed: bool,
    pub date_submitted: DateTime<Utc>,
    pub approval_date: Option<DateTime<Utc>>,
    pub removal_date: Option<DateTime<Utc>>,
    pub removal_reason: Option<String>,
    pub menu: Vec<MenuItemResponse>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        let removed = r.is_removed();
        Self {
            id: r.id,
            name: r.name,
            location: r.location,
            description: r.description,
            categories: r.categories,
            owner: r.owner,
            status: r.status,
            active: r.active,
            removed,
            date_submitted: r.date_submitted,
            approval_date: r.approval_date,
            removal_date: r.removal_date,
            removal_reason: r.removal_reason,
            menu: r.menu.into_iter().map(MenuItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str, location: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.into(),
            location: location.into(),
            description: "Fresh pasta daily".into(),
            categories: vec!["Italian".into(), " pasta ".into(), "italian".into(), "".into()],
        }
    }

    #[test]
    fn test_submit_creates_pending_record() {
        let r = Restaurant::submit("o1", details("Pasta House", "Main St"), Utc::now()).unwrap();

        assert_eq!(r.status, RestaurantStatus::Pending);
        assert!(!r.is_visible());
        assert!(r.menu.is_empty() && r.reviews.is_empty() && r.orders.is_empty());
        assert_eq!(r.categories, vec!["italian", "pasta"]);
    }

    #[test]
    fn test_submit_requires_name_and_location() {
        assert!(matches!(
            Restaurant::submit("o1", details("  ", "Main St"), Utc::now()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Restaurant::submit("o1", details("Pasta House", ""), Utc::now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_approve_then_remove() {
        let mut r = Restaurant::submit("o1", details("Pasta House", "Main St"), Utc::now()).unwrap();
        r.approve(Utc::now()).unwrap();
        assert!(r.is_visible());
        assert!(matches!(r.approve(Utc::now()), Err(AppError::InvalidState(_))));

        r.remove("health code violation", Utc::now()).unwrap();
        assert!(r.is_removed());
        assert!(!r.active);
        assert!(!r.is_visible());
        assert_eq!(r.removal_reason.as_deref(), Some("health code violation"));
    }

    #[test]
    fn test_remove_requires_approved() {
        let mut r = Restaurant::submit("o1", details("Pasta House", "Main St"), Utc::now()).unwrap();
        assert!(matches!(
            r.remove("reason", Utc::now()),
            Err(AppError::InvalidState(_))
        ));
        assert_eq!(r.status, RestaurantStatus::Pending);
    }

    #[test]
    fn test_paused_restaurant_is_invisible() {
        let mut r = Restaurant::submit("o1", details("Pasta House", "Main St"), Utc::now()).unwrap();
        assert!(r.set_active(true).is_err());

        r.approve(Utc::now()).unwrap();
        r.set_active(false).unwrap();
        assert!(!r.is_visible());
        r.set_active(true).unwrap();
        assert!(r.is_visible());
    }

    #[test]
    fn test_has_category() {
        let r = Restaurant::submit("o1", details("Pasta House", "Main St"), Utc::now()).unwrap();
        assert!(r.has_category("ITALIAN"));
        assert!(r.has_category("all"));
        assert!(!r.has_category("sushi"));
    }
}
