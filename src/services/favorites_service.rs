//! Favorites service - per-customer favorite restaurants.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Restaurant;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Favorites service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FavoriteService: Send + Sync {
    /// Favorite a visible restaurant. Returns false if it was already a favorite.
    async fn add(&self, user: String, restaurant_id: String) -> AppResult<bool>;

    /// Returns false if the restaurant was not a favorite.
    async fn remove(&self, user: String, restaurant_id: String) -> AppResult<bool>;

    /// Favorites that are still visible
    async fn list(&self, user: String) -> AppResult<Vec<Restaurant>>;
}

pub struct FavoritesManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FavoritesManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FavoriteService for FavoritesManager<U> {
    async fn add(&self, user: String, restaurant_id: String) -> AppResult<bool> {
        if user.trim().is_empty() {
            return Err(AppError::validation("User is required"));
        }

        self.uow
            .transaction(move |data| {
                data.restaurant(&restaurant_id)?.ensure_visible()?;
                Ok(data
                    .favorites
                    .entry(user)
                    .or_default()
                    .insert(restaurant_id))
            })
            .await
    }

    async fn remove(&self, user: String, restaurant_id: String) -> AppResult<bool> {
        self.uow
            .transaction(move |data| {
                let removed = match data.favorites.get_mut(&user) {
                    Some(ids) => ids.remove(&restaurant_id),
                    None => false,
                };
                if data.favorites.get(&user).is_some_and(|ids| ids.is_empty()) {
                    data.favorites.remove(&user);
                }
                Ok(removed)
            })
            .await
    }

    async fn list(&self, user: String) -> AppResult<Vec<Restaurant>> {
        self.uow
            .read(move |data| {
                let Some(ids) = data.favorites.get(&user) else {
                    return Ok(Vec::new());
                };
                Ok(data
                    .restaurants
                    .iter()
                    .filter(|r| ids.contains(&r.id) && r.is_visible())
                    .cloned()
                    .collect())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRestaurant;
    use crate::infra::Persistence;
    use chrono::Utc;

    async fn seeded(approved: bool) -> (Arc<Persistence>, String) {
        let uow = Arc::new(Persistence::in_memory());
        let id = uow
            .transaction(move |data| {
                let mut r = Restaurant::submit(
                    "o1",
                    NewRestaurant {
                        name: "Pasta House".into(),
                        location: "Main St".into(),
                        ..Default::default()
                    },
                    Utc::now(),
                )?;
                if approved {
                    r.approve(Utc::now())?;
                }
                let id = r.id.clone();
                data.restaurants.push(r);
                Ok(id)
            })
            .await
            .unwrap();
        (uow, id)
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let (uow, id) = seeded(true).await;
        let favorites = FavoritesManager::new(uow);

        assert!(favorites.add("c1".into(), id.clone()).await.unwrap());
        assert!(!favorites.add("c1".into(), id.clone()).await.unwrap());
        assert_eq!(favorites.list("c1".into()).await.unwrap().len(), 1);
        assert!(favorites.list("c2".into()).await.unwrap().is_empty());

        assert!(favorites.remove("c1".into(), id.clone()).await.unwrap());
        assert!(!favorites.remove("c1".into(), id).await.unwrap());
        assert!(favorites.list("c1".into()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_restaurant_cannot_be_favorited() {
        let (uow, id) = seeded(false).await;
        let favorites = FavoritesManager::new(uow);

        let result = favorites.add("c1".into(), id).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_paused_favorite_is_hidden_from_list() {
        let (uow, id) = seeded(true).await;
        let favorites = FavoritesManager::new(uow.clone());
        favorites.add("c1".into(), id.clone()).await.unwrap();

        let rid = id.clone();
        uow.transaction(move |data| data.restaurant_mut(&rid)?.set_active(false))
            .await
            .unwrap();

        assert!(favorites.list("c1".into()).await.unwrap().is_empty());
    }
}
