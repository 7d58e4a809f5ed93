//! Notification service - per-user notification feed.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{Notification, NotificationKind};
use crate::errors::AppResult;
use crate::infra::{Dataset, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One page of a feed and the unread total, taken from the same snapshot
#[derive(Debug)]
pub struct FeedPage {
    pub page: Paginated<Notification>,
    pub unread: usize,
}

/// Notification service trait for dependency injection.
///
/// Notifications are never pruned; `page_for` bounds what a reader pulls.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Append an unread notification for `recipient`
    async fn notify(&self, recipient: String, kind: NotificationKind) -> AppResult<Notification>;

    /// All notifications for `user`, newest first
    async fn list_for(&self, user: String) -> AppResult<Vec<Notification>>;

    /// One page of `list_for` plus the user's unread count
    async fn page_for(&self, user: String, params: PaginationParams) -> AppResult<FeedPage>;

    /// Mark every notification of `user` as read. Returns how many changed.
    async fn mark_all_read(&self, user: String) -> AppResult<usize>;

    async fn unread_count(&self, user: String) -> AppResult<usize>;
}

/// Newest first; equal timestamps keep insertion order.
fn feed_for(data: &Dataset, user: &str) -> Vec<Notification> {
    let mut feed: Vec<Notification> = data
        .notifications
        .iter()
        .filter(|n| n.recipient == user)
        .cloned()
        .collect();
    feed.sort_by(|a, b| b.date.cmp(&a.date));
    feed
}

/// Concrete implementation of NotificationService using Unit of Work.
pub struct NotificationCenter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationCenter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationCenter<U> {
    async fn notify(&self, recipient: String, kind: NotificationKind) -> AppResult<Notification> {
        self.uow
            .transaction(move |data| {
                Ok(data.notify(&recipient, kind, Utc::now()).clone())
            })
            .await
    }

    async fn list_for(&self, user: String) -> AppResult<Vec<Notification>> {
        self.uow.read(move |data| Ok(feed_for(data, &user))).await
    }

    async fn page_for(&self, user: String, params: PaginationParams) -> AppResult<FeedPage> {
        self.uow
            .read(move |data| {
                let feed = feed_for(data, &user);
                let unread = feed.iter().filter(|n| !n.read).count();
                let total = feed.len() as u64;

                let skip = usize::try_from(params.offset()).unwrap_or(usize::MAX);
                let take = usize::try_from(params.limit()).unwrap_or(usize::MAX);
                let items: Vec<Notification> = feed.into_iter().skip(skip).take(take).collect();

                Ok(FeedPage {
                    page: Paginated::new(items, params.page, params.limit(), total),
                    unread,
                })
            })
            .await
    }

    async fn mark_all_read(&self, user: String) -> AppResult<usize> {
        let changed = self
            .uow
            .transaction(move |data| {
                let mut changed = 0;
                for n in data
                    .notifications
                    .iter_mut()
                    .filter(|n| n.recipient == user && !n.read)
                {
                    n.read = true;
                    changed += 1;
                }
                Ok(changed)
            })
            .await?;

        tracing::debug!(changed, "Notifications marked read");
        Ok(changed)
    }

    async fn unread_count(&self, user: String) -> AppResult<usize> {
        self.uow
            .read(move |data| {
                Ok(data
                    .notifications
                    .iter()
                    .filter(|n| n.recipient == user && !n.read)
                    .count())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Persistence;
    use chrono::Duration;

    fn review_reply(restaurant: &str, reply: &str) -> NotificationKind {
        NotificationKind::ReviewReply {
            restaurant_id: restaurant.into(),
            restaurant_name: "Pasta House".into(),
            reply: reply.into(),
        }
    }

    fn center() -> NotificationCenter<Persistence> {
        NotificationCenter::new(Arc::new(Persistence::in_memory()))
    }

    #[tokio::test]
    async fn test_list_for_is_newest_first_and_per_user() {
        let uow = Arc::new(Persistence::in_memory());
        let now = Utc::now();
        uow.transaction(|data| {
            data.notify("c1", review_reply("r1", "first"), now - Duration::seconds(2));
            data.notify("c2", review_reply("r1", "other"), now - Duration::seconds(1));
            data.notify("c1", review_reply("r1", "second"), now);
            Ok(())
        })
        .await
        .unwrap();

        let feed = NotificationCenter::new(uow).list_for("c1".into()).await.unwrap();
        let replies: Vec<_> = feed
            .iter()
            .map(|n| match &n.kind {
                NotificationKind::ReviewReply { reply, .. } => reply.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(replies, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order() {
        let uow = Arc::new(Persistence::in_memory());
        let now = Utc::now();
        uow.transaction(|data| {
            data.notify("c1", review_reply("r1", "old"), now - Duration::minutes(1));
            data.notify("c1", review_reply("r1", "a"), now);
            data.notify("c1", review_reply("r1", "b"), now);
            Ok(())
        })
        .await
        .unwrap();

        let feed = NotificationCenter::new(uow).list_for("c1".into()).await.unwrap();
        let replies: Vec<_> = feed
            .iter()
            .map(|n| match &n.kind {
                NotificationKind::ReviewReply { reply, .. } => reply.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(replies, vec!["a", "b", "old"]);
    }

    #[tokio::test]
    async fn test_mark_all_read_is_idempotent_and_scoped() {
        let center = center();
        center.notify("c1".into(), review_reply("r1", "a")).await.unwrap();
        center.notify("c1".into(), review_reply("r1", "b")).await.unwrap();
        center.notify("c2".into(), review_reply("r1", "c")).await.unwrap();

        assert_eq!(center.unread_count("c1".into()).await.unwrap(), 2);
        assert_eq!(center.mark_all_read("c1".into()).await.unwrap(), 2);
        let once: Vec<bool> = center
            .list_for("c1".into())
            .await
            .unwrap()
            .iter()
            .map(|n| n.read)
            .collect();

        assert_eq!(center.mark_all_read("c1".into()).await.unwrap(), 0);
        let twice: Vec<bool> = center
            .list_for("c1".into())
            .await
            .unwrap()
            .iter()
            .map(|n| n.read)
            .collect();

        assert_eq!(once, twice);
        assert_eq!(center.unread_count("c1".into()).await.unwrap(), 0);
        assert_eq!(center.unread_count("c2".into()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_page_for() {
        let center = center();
        for i in 0..5 {
            center
                .notify("c1".into(), review_reply("r1", &i.to_string()))
                .await
                .unwrap();
        }

        center.mark_all_read("c1".into()).await.unwrap();
        center.notify("c1".into(), review_reply("r1", "new")).await.unwrap();

        let feed = center
            .page_for("c1".into(), PaginationParams { page: 2, per_page: 2 })
            .await
            .unwrap();

        assert_eq!(feed.page.data.len(), 2);
        assert_eq!(feed.page.meta.total, 6);
        assert_eq!(feed.page.meta.total_pages, 3);
        assert_eq!(feed.unread, 1);
    }

    #[tokio::test]
    async fn test_page_far_past_the_end_is_empty() {
        let center = center();
        center.notify("c1".into(), review_reply("r1", "a")).await.unwrap();

        let feed = center
            .page_for("c1".into(), PaginationParams { page: u64::MAX, per_page: 20 })
            .await
            .unwrap();

        assert!(feed.page.data.is_empty());
        assert_eq!(feed.page.meta.total, 1);
        assert_eq!(feed.unread, 1);
    }
}
