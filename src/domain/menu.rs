//! Menu items and price handling.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::PRICE_SCALE;
use crate::errors::{AppError, AppResult};

/// Round a price to two decimals, rejecting negative values.
pub fn normalize_price(price: Decimal) -> AppResult<Decimal> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::validation("Price must not be negative"));
    }
    let mut rounded = price.round_dp(PRICE_SCALE);
    rounded.rescale(PRICE_SCALE);
    Ok(rounded)
}

/// Fixed two-decimal rendering used in responses.
pub fn format_price(price: Decimal) -> String {
    let mut shown = price.round_dp(PRICE_SCALE);
    shown.rescale(PRICE_SCALE);
    shown.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date_added: DateTime<Utc>,
}

/// Fields for a new menu item
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Partial update of a menu item; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct MenuItemChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl MenuItem {
    pub fn create(item: NewMenuItem, now: DateTime<Utc>) -> AppResult<Self> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Menu item name is required"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price: normalize_price(item.price)?,
            description: non_blank(item.description),
            category: non_blank(item.category),
            date_added: now,
        })
    }

    /// Apply changes. Validation happens before any field is touched.
    pub fn apply(&mut self, changes: MenuItemChanges) -> AppResult<()> {
        let name = match changes.name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::validation("Menu item name is required"))
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let price = changes.price.map(normalize_price).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if changes.description.is_some() {
            self.description = non_blank(changes.description);
        }
        if changes.category.is_some() {
            self.category = non_blank(changes.category);
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: String,
    #[schema(example = "Spaghetti")]
    pub name: String,
    /// Price with two decimals
    #[schema(example = "10.00")]
    pub price: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: format_price(item.price),
            description: item.description,
            category: item.category,
            date_added: item.date_added,
        }
    }
}
