//! Menu service - owner-side menu management.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{MenuItem, MenuItemChanges, NewMenuItem, Restaurant};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Dataset, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Menu service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn add_item(
        &self,
        owner: String,
        restaurant_id: String,
        item: NewMenuItem,
    ) -> AppResult<MenuItem>;

    async fn update_item(
        &self,
        owner: String,
        restaurant_id: String,
        item_id: String,
        changes: MenuItemChanges,
    ) -> AppResult<MenuItem>;

    async fn remove_item(
        &self,
        owner: String,
        restaurant_id: String,
        item_id: String,
    ) -> AppResult<MenuItem>;

    async fn menu(&self, restaurant_id: String) -> AppResult<Vec<MenuItem>>;
}

/// Concrete implementation of MenuService using Unit of Work.
pub struct MenuManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MenuManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Restaurant the owner may edit: exists, owned by `owner`, not removed.
fn editable<'a>(data: &'a mut Dataset, owner: &str, id: &str) -> AppResult<&'a mut Restaurant> {
    let restaurant = data.restaurant_mut(id)?;
    restaurant.ensure_owner(owner)?;
    restaurant.ensure_not_removed()?;
    Ok(restaurant)
}

#[async_trait]
impl<U: UnitOfWork> MenuService for MenuManager<U> {
    async fn add_item(
        &self,
        owner: String,
        restaurant_id: String,
        item: NewMenuItem,
    ) -> AppResult<MenuItem> {
        let item = self
            .uow
            .transaction(move |data| {
                let restaurant = editable(data, &owner, &restaurant_id)?;
                let item = MenuItem::create(item, Utc::now())?;
                restaurant.menu.push(item.clone());
                Ok(item)
            })
            .await?;

        tracing::info!(item_id = %item.id, name = %item.name, "Menu item added");
        Ok(item)
    }

    async fn update_item(
        &self,
        owner: String,
        restaurant_id: String,
        item_id: String,
        changes: MenuItemChanges,
    ) -> AppResult<MenuItem> {
        self.uow
            .transaction(move |data| {
                let restaurant = editable(data, &owner, &restaurant_id)?;
                let item = restaurant
                    .menu
                    .iter_mut()
                    .find(|item| item.id == item_id)
                    .ok_or_not_found("Menu item")?;
                item.apply(changes)?;
                Ok(item.clone())
            })
            .await
    }

    async fn remove_item(
        &self,
        owner: String,
        restaurant_id: String,
        item_id: String,
    ) -> AppResult<MenuItem> {
        let item = self
            .uow
            .transaction(move |data| {
                let restaurant = editable(data, &owner, &restaurant_id)?;
                let index = restaurant
                    .menu
                    .iter()
                    .position(|item| item.id == item_id)
                    .ok_or_not_found("Menu item")?;
                Ok(restaurant.menu.remove(index))
            })
            .await?;

        tracing::info!(item_id = %item.id, "Menu item removed");
        Ok(item)
    }

    async fn menu(&self, restaurant_id: String) -> AppResult<Vec<MenuItem>> {
        self.uow
            .read(move |data| {
                let restaurant = data.restaurant(&restaurant_id)?;
                restaurant.ensure_not_removed()?;
                Ok(restaurant.menu.clone())
            })
            .await
    }
}
