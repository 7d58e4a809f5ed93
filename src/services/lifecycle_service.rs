//! Restaurant lifecycle service - submission, approval, rejection, removal.
//!
//! Each transition runs inside a single Unit of Work transaction together
//! with all of its cascades, so callers never observe a half-applied change.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::CANCELLATION_REASON_RESTAURANT_REMOVED;
use crate::domain::{ApprovalStatus, NewRestaurant, NotificationKind, Restaurant};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// What the removal cascade touched
#[derive(Debug, Clone)]
pub struct RemovalReport {
    pub restaurant: Restaurant,
    pub favorites_pruned: usize,
    pub orders_cancelled: Vec<String>,
    pub owners_updated: usize,
    pub reviews_hidden: usize,
}

/// Lifecycle service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LifecycleService: Send + Sync {
    /// Create a pending restaurant for `owner`
    async fn submit(&self, owner: String, details: NewRestaurant) -> AppResult<Restaurant>;

    /// pending -> approved, notifies the owner
    async fn approve(&self, id: String) -> AppResult<Restaurant>;

    /// Delete a pending restaurant, notifies the owner with the reason
    async fn reject(&self, id: String, reason: String) -> AppResult<Restaurant>;

    /// approved -> removed, with the full cascade
    async fn remove(&self, id: String, reason: String) -> AppResult<RemovalReport>;

    /// Owner pauses or resumes an approved restaurant
    async fn set_active(&self, owner: String, id: String, active: bool) -> AppResult<Restaurant>;

    /// Raw record lookup, including removed restaurants
    async fn find(&self, id: String) -> AppResult<Option<Restaurant>>;
}

/// Concrete implementation of LifecycleService using Unit of Work.
pub struct LifecycleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LifecycleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn require_reason(reason: &str) -> AppResult<&str> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::validation("A reason is required"));
    }
    Ok(reason)
}

#[async_trait]
impl<U: UnitOfWork> LifecycleService for LifecycleManager<U> {
    async fn submit(&self, owner: String, details: NewRestaurant) -> AppResult<Restaurant> {
        let restaurant = self
            .uow
            .transaction(move |data| {
                let restaurant = Restaurant::submit(&owner, details, Utc::now())?;

                // Owners are weak references: unregistered owners are allowed,
                // registered customers are not.
                if let Some(user) = data.user_mut(&restaurant.owner) {
                    if !(user.role.is_owner() || user.role.is_admin()) {
                        return Err(AppError::forbidden("Only owners can submit restaurants"));
                    }
                    user.restaurants.insert(restaurant.id.clone());
                }

                data.restaurants.push(restaurant.clone());
                Ok(restaurant)
            })
            .await?;

        tracing::info!(
            restaurant_id = %restaurant.id,
            owner = %restaurant.owner,
            "Restaurant submitted for approval"
        );
        Ok(restaurant)
    }

    async fn approve(&self, id: String) -> AppResult<Restaurant> {
        let restaurant = self
            .uow
            .transaction(move |data| {
                let now = Utc::now();
                let restaurant = data.restaurant_mut(&id)?;
                restaurant.approve(now)?;
                let restaurant = restaurant.clone();

                data.notify(
                    &restaurant.owner,
                    NotificationKind::RestaurantApproval {
                        restaurant_id: restaurant.id.clone(),
                        restaurant_name: restaurant.name.clone(),
                        status: ApprovalStatus::Approved,
                        reason: None,
                    },
                    now,
                );
                Ok(restaurant)
            })
            .await?;

        tracing::info!(restaurant_id = %restaurant.id, "Restaurant approved");
        Ok(restaurant)
    }

    async fn reject(&self, id: String, reason: String) -> AppResult<Restaurant> {
        let reason = require_reason(&reason)?.to_string();

        let restaurant = self
            .uow
            .transaction(move |data| {
                data.restaurant(&id)?.ensure_pending()?;
                let restaurant = data.take_restaurant(&id)?;
                data.release_restaurant(&id);

                data.notify(
                    &restaurant.owner,
                    NotificationKind::RestaurantApproval {
                        restaurant_id: restaurant.id.clone(),
                        restaurant_name: restaurant.name.clone(),
                        status: ApprovalStatus::Rejected,
                        reason: Some(reason),
                    },
                    Utc::now(),
                );
                Ok(restaurant)
            })
            .await?;

        tracing::info!(restaurant_id = %restaurant.id, "Restaurant rejected and deleted");
        Ok(restaurant)
    }

    async fn remove(&self, id: String, reason: String) -> AppResult<RemovalReport> {
        let reason = require_reason(&reason)?.to_string();

        let report = self
            .uow
            .transaction(move |data| {
                let now = Utc::now();
                let restaurant = data.restaurant_mut(&id)?;
                restaurant.remove(&reason, now)?;
                let orders_cancelled =
                    restaurant.cancel_pending_orders(CANCELLATION_REASON_RESTAURANT_REMOVED);
                let reviews_hidden = restaurant.archive_reviews();
                let restaurant = restaurant.clone();

                let favorites_pruned = data.prune_favorites(&id);
                let owners_updated = data.release_restaurant(&id);

                data.notify(
                    &restaurant.owner,
                    NotificationKind::RestaurantApproval {
                        restaurant_id: restaurant.id.clone(),
                        restaurant_name: restaurant.name.clone(),
                        status: ApprovalStatus::Removed,
                        reason: Some(reason),
                    },
                    now,
                );

                Ok(RemovalReport {
                    restaurant,
                    favorites_pruned,
                    orders_cancelled,
                    owners_updated,
                    reviews_hidden,
                })
            })
            .await?;

        tracing::info!(
            restaurant_id = %report.restaurant.id,
            favorites_pruned = report.favorites_pruned,
            orders_cancelled = report.orders_cancelled.len(),
            reviews_hidden = report.reviews_hidden,
            "Restaurant removed from platform"
        );
        Ok(report)
    }

    async fn set_active(&self, owner: String, id: String, active: bool) -> AppResult<Restaurant> {
        self.uow
            .transaction(move |data| {
                let restaurant = data.restaurant_mut(&id)?;
                restaurant.ensure_owner(&owner)?;
                restaurant.set_active(active)?;
                Ok(restaurant.clone())
            })
            .await
    }

    async fn find(&self, id: String) -> AppResult<Option<Restaurant>> {
        self.uow
            .read(move |data| Ok(data.restaurants.iter().find(|r| r.id == id).cloned()))
            .await
    }
}
