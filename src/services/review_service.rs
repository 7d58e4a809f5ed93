//! Review board - customer reviews and owner replies.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{NotificationKind, Review};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Append a review to a visible restaurant, notifying the owner.
    /// Returns the review with its index.
    async fn add_review(
        &self,
        restaurant_id: String,
        author: String,
        text: String,
    ) -> AppResult<(usize, Review)>;

    /// Owner reply to the review at `review_index`, notifying its author
    async fn reply(
        &self,
        restaurant_id: String,
        review_index: usize,
        author: String,
        text: String,
    ) -> AppResult<Review>;

    /// Non-hidden reviews in chronological order, with their indices
    async fn visible_reviews(&self, restaurant_id: String) -> AppResult<Vec<(usize, Review)>>;
}

/// Concrete implementation of ReviewService using Unit of Work.
pub struct ReviewBoard<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewBoard<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewBoard<U> {
    async fn add_review(
        &self,
        restaurant_id: String,
        author: String,
        text: String,
    ) -> AppResult<(usize, Review)> {
        let (index, review) = self
            .uow
            .transaction(move |data| {
                let now = Utc::now();
                let restaurant = data.restaurant_mut(&restaurant_id)?;
                restaurant.ensure_visible()?;

                let review = Review::write(&author, &text, now)?;
                let index = restaurant.reviews.len();
                restaurant.reviews.push(review.clone());

                let owner = restaurant.owner.clone();
                let kind = NotificationKind::NewReview {
                    restaurant_id: restaurant.id.clone(),
                    restaurant_name: restaurant.name.clone(),
                    author: review.user.clone(),
                    review_text: review.text.clone(),
                };
                data.notify(&owner, kind, now);
                Ok((index, review))
            })
            .await?;

        tracing::info!(author = %review.user, index, "Review added");
        Ok((index, review))
    }

    async fn reply(
        &self,
        restaurant_id: String,
        review_index: usize,
        author: String,
        text: String,
    ) -> AppResult<Review> {
        self.uow
            .transaction(move |data| {
                let now = Utc::now();
                let restaurant = data.restaurant_mut(&restaurant_id)?;
                restaurant.ensure_not_removed()?;
                restaurant.ensure_owner(&author)?;

                let review = restaurant
                    .reviews
                    .get_mut(review_index)
                    .ok_or_not_found("Review")?;
                review.set_reply(&text, now)?;
                let review = review.clone();

                let kind = NotificationKind::ReviewReply {
                    restaurant_id: restaurant.id.clone(),
                    restaurant_name: restaurant.name.clone(),
                    reply: review.reply.clone().unwrap_or_default(),
                };
                data.notify(&review.user, kind, now);
                Ok(review)
            })
            .await
    }

    async fn visible_reviews(&self, restaurant_id: String) -> AppResult<Vec<(usize, Review)>> {
        self.uow
            .read(move |data| {
                let restaurant = data.restaurant(&restaurant_id)?;
                Ok(restaurant
                    .reviews
                    .iter()
                    .enumerate()
                    .filter(|(_, review)| !review.hidden)
                    .map(|(index, review)| (index, review.clone()))
                    .collect())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRestaurant, Restaurant};
    use crate::errors::AppError;
    use crate::infra::Persistence;

    async fn store_with(approved: bool) -> (Arc<Persistence>, String) {
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
    async fn test_review_on_pending_restaurant_fails() {
        let (_, id) = store_with(false).await;
        let board = ReviewBoard::new(Arc::new(Persistence::in_memory()));
        let missing = board.add_review(id, "c1".into(), "Nice".into()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let (uow, id) = store_with(false).await;
        let board = ReviewBoard::new(uow);
        let pending = board.add_review(id.clone(), "c1".into(), "Nice".into()).await;
        assert!(matches!(pending, Err(AppError::InvalidState(_))));
        assert!(board.visible_reviews(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reply_flow() {
        let (uow, id) = store_with(true).await;
        let board = ReviewBoard::new(uow.clone());
        board
            .add_review(id.clone(), "c1".into(), "Great pasta".into())
            .await
            .unwrap();

        let stranger = board.reply(id.clone(), 0, "c2".into(), "Hi".into()).await;
        assert!(matches!(stranger, Err(AppError::Forbidden(_))));

        let missing = board.reply(id.clone(), 7, "o1".into(), "Hi".into()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let replied = board
            .reply(id.clone(), 0, "o1".into(), "Thanks!".into())
            .await
            .unwrap();
        assert_eq!(replied.reply.as_deref(), Some("Thanks!"));

        let overwrite = board.reply(id.clone(), 0, "o1".into(), "Edit".into()).await;
        assert!(matches!(overwrite, Err(AppError::InvalidState(_))));

        let kinds = uow
            .read(|data| {
                Ok(data
                    .notifications
                    .iter()
                    .map(|n| (n.recipient.clone(), n.kind.type_name()))
                    .collect::<Vec<_>>())
            })
            .await
            .unwrap();
        assert_eq!(
            kinds,
            vec![
                ("o1".to_string(), "new-review"),
                ("c1".to_string(), "review-reply")
            ]
        );

        let owner_feed = uow
            .read(|data| Ok(data.notifications[0].kind.clone()))
            .await
            .unwrap();
        assert!(matches!(
            owner_feed,
            NotificationKind::NewReview { ref author, ref review_text, .. }
                if author == "c1" && review_text == "Great pasta"
        ));
    }

    #[tokio::test]
    async fn test_visible_reviews_keep_order_and_indices() {
        let (uow, id) = store_with(true).await;
        let board = ReviewBoard::new(uow);
        for text in ["first", "second", "third"] {
            board
                .add_review(id.clone(), "c1".into(), text.into())
                .await
                .unwrap();
        }

        let reviews = board.visible_reviews(id).await.unwrap();
        let shown: Vec<_> = reviews.iter().map(|(i, r)| (*i, r.text.as_str())).collect();
        assert_eq!(shown, vec![(0, "first"), (1, "second"), (2, "third")]);
    }
}
