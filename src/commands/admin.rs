//! Admin console commands - moderation against the data file.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{NotificationResponse, Restaurant};
use crate::errors::{AppError, AppResult};
use crate::infra::Persistence;
use crate::services::{parallel, ServiceContainer, Services};

async fn open(config: &Config) -> AppResult<Services> {
    let store = Persistence::open(&config.data_file).await?;
    tracing::debug!(path = %config.data_file.display(), "Data file loaded");
    Ok(Services::new(Arc::new(store)))
}

fn print_restaurants(title: &str, restaurants: &[Restaurant]) {
    println!("\n=== {} ({}) ===", title, restaurants.len());
    for r in restaurants {
        let when = r.approval_date.unwrap_or(r.date_submitted);
        println!(
            "{}  {:<24} owner={:<28} {}",
            r.id,
            r.name,
            r.owner,
            when.format("%Y-%m-%d %H:%M")
        );
    }
}

pub async fn pending(config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let queue = services.catalog().pending().await?;
    print_restaurants("Pending approval", &queue);
    Ok(())
}

pub async fn approved(config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let history = services.catalog().approved().await?;
    print_restaurants("Approved", &history);
    Ok(())
}

/// Approve every id; failures are reported per id and fail the command.
pub async fn approve(ids: Vec<String>, config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let lifecycle = services.lifecycle();

    let attempts = ids.iter().map(|id| lifecycle.approve(id.clone())).collect();
    let results = parallel::settle_all(attempts).await;

    let mut failed = 0;
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(r) => println!("approved  {}  {}", r.id, r.name),
            Err(e) => {
                failed += 1;
                println!("failed    {}  {}", id, e);
            }
        }
    }

    if failed > 0 {
        return Err(AppError::validation(format!(
            "{} of {} approvals failed",
            failed,
            ids.len()
        )));
    }
    Ok(())
}

pub async fn reject(id: String, reason: String, config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let r = services.lifecycle().reject(id, reason).await?;
    println!("rejected  {}  {} (record deleted)", r.id, r.name);
    Ok(())
}

pub async fn remove(id: String, reason: String, config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let report = services.lifecycle().remove(id, reason).await?;

    println!("removed   {}  {}", report.restaurant.id, report.restaurant.name);
    println!("  favorites pruned: {}", report.favorites_pruned);
    println!("  orders cancelled: {}", report.orders_cancelled.len());
    println!("  owners updated:   {}", report.owners_updated);
    println!("  reviews hidden:   {}", report.reviews_hidden);
    Ok(())
}

pub async fn notifications(email: String, mark_read: bool, config: Config) -> AppResult<()> {
    let services = open(&config).await?;
    let feed = services.notifications().list_for(email.clone()).await?;

    println!("\n=== Notifications for {} ({}) ===", email, feed.len());
    for n in feed.into_iter().map(NotificationResponse::from) {
        let marker = if n.read { " " } else { "*" };
        let detail = n
            .reason
            .or(n.reply)
            .or(n.total.map(|t| format!("total {}", t)))
            .or(n.author.map(|a| match n.review_text {
                Some(text) if !text.is_empty() => format!("by {}: {}", a, text),
                _ => format!("by {}", a),
            }))
            .unwrap_or_default();
        println!(
            "{} {}  {:<20} {}  {}",
            marker,
            n.date.format("%Y-%m-%d %H:%M"),
            n.kind,
            n.restaurant_name,
            detail
        );
    }

    if mark_read {
        let marked = services.notifications().mark_all_read(email).await?;
        println!("marked {} as read", marked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRestaurant;

    async fn config_with_pending() -> (tempfile::TempDir, Config, String) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_file(Some(dir.path().join("hub.json")));

        let services = open(&config).await.unwrap();
        let r = services
            .lifecycle()
            .submit(
                "o1@example.com".into(),
                NewRestaurant {
                    name: "Pasta House".into(),
                    location: "Main St".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (dir, config, r.id)
    }

    #[tokio::test]
    async fn test_approve_persists_to_data_file() {
        let (_dir, config, id) = config_with_pending().await;

        approve(vec![id.clone()], config.clone()).await.unwrap();

        let reopened = open(&config).await.unwrap();
        let approved = reopened.catalog().approved().await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, id);
    }

    #[tokio::test]
    async fn test_approve_reports_unknown_ids() {
        let (_dir, config, id) = config_with_pending().await;

        let result = approve(vec![id, "missing".into()], config.clone()).await;
        assert!(result.is_err());

        // The valid id was still approved
        let reopened = open(&config).await.unwrap();
        assert_eq!(reopened.catalog().approved().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_notifications_mark_read() {
        let (_dir, config, id) = config_with_pending().await;
        reject(id, "incomplete info".into(), config.clone())
            .await
            .unwrap();

        notifications("o1@example.com".into(), true, config.clone())
            .await
            .unwrap();

        let reopened = open(&config).await.unwrap();
        let unread = reopened
            .notifications()
            .unread_count("o1@example.com".into())
            .await
            .unwrap();
        assert_eq!(unread, 0);
    }
}
