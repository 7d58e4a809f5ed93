//! Catalog - read-side restaurant listings for customers, owners and admins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Restaurant, RestaurantStatus};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Dataset, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Visible restaurants, optionally narrowed to one category
    async fn browse(&self, category: Option<String>) -> AppResult<Vec<Restaurant>>;

    /// A single visible restaurant
    async fn restaurant(&self, id: String) -> AppResult<Restaurant>;

    /// Owner dashboard: every submission except removed ones
    async fn owner_restaurants(&self, owner: String) -> AppResult<Vec<Restaurant>>;

    /// Admin queue, oldest submission first
    async fn pending(&self) -> AppResult<Vec<Restaurant>>;

    /// Approval history, most recent approval first
    async fn approved(&self) -> AppResult<Vec<Restaurant>>;
}

pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn select(data: &Dataset, keep: impl Fn(&Restaurant) -> bool) -> Vec<Restaurant> {
    data.restaurants.iter().filter(|r| keep(r)).cloned().collect()
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn browse(&self, category: Option<String>) -> AppResult<Vec<Restaurant>> {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        self.uow
            .read(move |data| {
                Ok(select(data, |r| {
                    r.is_visible()
                        && category.as_deref().map_or(true, |c| r.has_category(c))
                }))
            })
            .await
    }

    async fn restaurant(&self, id: String) -> AppResult<Restaurant> {
        self.uow
            .read(move |data| {
                data.restaurants
                    .iter()
                    .find(|r| r.id == id && r.is_visible())
                    .cloned()
                    .ok_or_not_found("Restaurant")
            })
            .await
    }

    async fn owner_restaurants(&self, owner: String) -> AppResult<Vec<Restaurant>> {
        self.uow
            .read(move |data| Ok(select(data, |r| r.is_owned_by(&owner) && !r.is_removed())))
            .await
    }

    async fn pending(&self) -> AppResult<Vec<Restaurant>> {
        let mut queue = self
            .uow
            .read(|data| Ok(select(data, Restaurant::is_pending)))
            .await?;
        queue.sort_by(|a, b| a.date_submitted.cmp(&b.date_submitted));
        Ok(queue)
    }

    async fn approved(&self) -> AppResult<Vec<Restaurant>> {
        let mut history = self
            .uow
            .read(|data| {
                Ok(select(data, |r| r.status == RestaurantStatus::Approved))
            })
            .await?;
        history.sort_by(|a, b| b.approval_date.cmp(&a.approval_date));
        Ok(history)
    }
}
