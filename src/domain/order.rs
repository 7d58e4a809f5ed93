//! Orders placed against a restaurant's menu.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::menu::format_price;
use super::MenuItem;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cancelled,
    Completed,
}

/// A line the customer asks for
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLine {
    pub item_id: String,
    #[schema(example = 2, minimum = 1)]
    pub quantity: u32,
}

/// A priced line as recorded on the order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    /// Menu price at placement time
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// Always fits for recorded orders; `Order::place` rejects lines whose
    /// product would overflow.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
}

impl Order {
    /// Price the requested lines against the current menu.
    ///
    /// Lines naming the same item are merged. The total is fixed here and
    /// never recomputed when menu prices change later.
    pub fn place(
        restaurant_id: &str,
        customer_email: &str,
        lines: Vec<OrderLine>,
        menu: &[MenuItem],
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        if lines.is_empty() {
            return Err(AppError::EmptyOrder);
        }
        if customer_email.trim().is_empty() {
            return Err(AppError::validation("Customer email is required"));
        }

        let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity < 1 {
                return Err(AppError::validation(format!(
                    "Quantity for item {} must be at least 1",
                    line.item_id
                )));
            }
            let menu_item = menu
                .iter()
                .find(|m| m.id == line.item_id)
                .ok_or_else(|| {
                    AppError::validation(format!("Item {} is not on the menu", line.item_id))
                })?;

            match items.iter_mut().find(|i| i.item_id == line.item_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(line.quantity)
                        .ok_or_else(|| AppError::validation("Quantity too large"))?;
                }
                None => items.push(OrderItem {
                    item_id: menu_item.id.clone(),
                    name: menu_item.name.clone(),
                    price: menu_item.price,
                    quantity: line.quantity,
                }),
            }
        }

        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| {
                item.price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|subtotal| total.checked_add(subtotal))
            })
            .ok_or_else(|| AppError::validation("Order total too large"))?;

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            restaurant_id: restaurant_id.to_string(),
            customer_email: customer_email.trim().to_string(),
            items,
            total,
            order_date: now,
            status: OrderStatus::Pending,
            cancellation_reason: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Cancel if still pending. Returns whether the order changed.
    pub fn cancel(&mut self, reason: &str) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.cancellation_reason = Some(reason.to_string());
        true
    }

    pub fn complete(&mut self) -> AppResult<()> {
        if !self.is_pending() {
            return Err(AppError::invalid_state("Only pending orders can be completed"));
        }
        self.status = OrderStatus::Completed;
        Ok(())
    }
}

/// Newest first; equal dates keep recording order.
pub fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub item_id: String,
    pub name: String,
    #[schema(example = "10.00")]
    pub price: String,
    pub quantity: u32,
    #[schema(example = "20.00")]
    pub subtotal: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub restaurant_id: String,
    pub customer_email: String,
    pub items: Vec<OrderItemResponse>,
    #[schema(example = "20.00")]
    pub total: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            restaurant_id: order.restaurant_id,
            customer_email: order.customer_email,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    subtotal: format_price(item.subtotal()),
                    price: format_price(item.price),
                    item_id: item.item_id,
                    name: item.name,
                    quantity: item.quantity,
                })
                .collect(),
            total: format_price(order.total),
            order_date: order.order_date,
            status: order.status,
            cancellation_reason: order.cancellation_reason,
        }
    }
}
