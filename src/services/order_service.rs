//! Order ledger - placing orders and reading order history.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::order::newest_first;
use crate::domain::{NotificationKind, Order, OrderLine};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Price and record a pending order, notifying the owner
    async fn place(
        &self,
        restaurant_id: String,
        customer_email: String,
        lines: Vec<OrderLine>,
    ) -> AppResult<Order>;

    /// Cancel every pending order of a restaurant. Returns cancelled ids.
    async fn cancel_pending_for_restaurant(
        &self,
        restaurant_id: String,
        reason: String,
    ) -> AppResult<Vec<String>>;

    /// Orders of one restaurant, newest first
    async fn history_for(&self, restaurant_id: String) -> AppResult<Vec<Order>>;

    /// Orders of one customer across restaurants, newest first
    async fn orders_for_customer(&self, customer_email: String) -> AppResult<Vec<Order>>;

    /// Owner marks a pending order completed
    async fn complete(
        &self,
        owner: String,
        restaurant_id: String,
        order_id: String,
    ) -> AppResult<Order>;
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct OrderLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderLedger<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderLedger<U> {
    async fn place(
        &self,
        restaurant_id: String,
        customer_email: String,
        lines: Vec<OrderLine>,
    ) -> AppResult<Order> {
        let order = self
            .uow
            .transaction(move |data| {
                let now = Utc::now();
                let restaurant = data.restaurant_mut(&restaurant_id)?;
                restaurant.ensure_visible()?;

                let order =
                    Order::place(&restaurant.id, &customer_email, lines, &restaurant.menu, now)?;
                restaurant.orders.push(order.clone());

                let owner = restaurant.owner.clone();
                let kind = NotificationKind::NewOrder {
                    restaurant_id: restaurant.id.clone(),
                    restaurant_name: restaurant.name.clone(),
                    order_id: order.id.clone(),
                    total: order.total,
                };
                data.notify(&owner, kind, now);
                Ok(order)
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            restaurant_id = %order.restaurant_id,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }

    async fn cancel_pending_for_restaurant(
        &self,
        restaurant_id: String,
        reason: String,
    ) -> AppResult<Vec<String>> {
        self.uow
            .transaction(move |data| {
                let restaurant = data.restaurant_mut(&restaurant_id)?;
                Ok(restaurant.cancel_pending_orders(&reason))
            })
            .await
    }

    async fn history_for(&self, restaurant_id: String) -> AppResult<Vec<Order>> {
        let mut orders = self
            .uow
            .read(move |data| Ok(data.restaurant(&restaurant_id)?.orders.clone()))
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    async fn orders_for_customer(&self, customer_email: String) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .uow
            .read(move |data| {
                Ok(data
                    .restaurants
                    .iter()
                    .flat_map(|r| r.orders.iter())
                    .filter(|o| o.customer_email == customer_email)
                    .cloned()
                    .collect())
            })
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    async fn complete(
        &self,
        owner: String,
        restaurant_id: String,
        order_id: String,
    ) -> AppResult<Order> {
        self.uow
            .transaction(move |data| {
                let restaurant = data.restaurant_mut(&restaurant_id)?;
                restaurant.ensure_owner(&owner)?;
                let order = restaurant
                    .orders
                    .iter_mut()
                    .find(|o| o.id == order_id)
                    .ok_or_not_found("Order")?;
                order.complete()?;
                Ok(order.clone())
            })
            .await
    }
}
