//! The persisted collections and the cross-collection helpers used by
//! cascades.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Notification, NotificationKind, Restaurant, User};
use crate::errors::{AppResult, OptionExt};

/// Every named collection of the store.
///
/// Orders and reviews live inside their restaurant; there is no top-level
/// mirror of either.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub users: Vec<User>,
    /// email -> favorite restaurant ids
    #[serde(default)]
    pub favorites: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Dataset {
    pub fn restaurant(&self, id: &str) -> AppResult<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| r.id == id)
            .ok_or_not_found("Restaurant")
    }

    pub fn restaurant_mut(&mut self, id: &str) -> AppResult<&mut Restaurant> {
        self.restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_not_found("Restaurant")
    }

    /// Delete a restaurant record, returning it.
    pub fn take_restaurant(&mut self, id: &str) -> AppResult<Restaurant> {
        let index = self
            .restaurants
            .iter()
            .position(|r| r.id == id)
            .ok_or_not_found("Restaurant")?;
        Ok(self.restaurants.remove(index))
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn user_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.email == email)
    }

    /// Append a notification for `recipient`.
    pub fn notify(
        &mut self,
        recipient: &str,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> &Notification {
        tracing::debug!(recipient, kind = kind.type_name(), "Notification queued");
        self.notifications
            .push(Notification::new(recipient, kind, now));
        &self.notifications[self.notifications.len() - 1]
    }

    /// Remove a restaurant from every favorites set. Returns how many sets
    /// contained it.
    pub fn prune_favorites(&mut self, restaurant_id: &str) -> usize {
        self.favorites
            .values_mut()
            .filter_map(|ids| ids.remove(restaurant_id).then_some(()))
            .count()
    }

    /// Remove a restaurant from every user's owned set. Returns how many
    /// users were updated.
    pub fn release_restaurant(&mut self, restaurant_id: &str) -> usize {
        self.users
            .iter_mut()
            .filter_map(|user| user.release(restaurant_id).then_some(()))
            .count()
    }
}
