//! Customer reviews and owner replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Author email
    pub user: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub reply: Option<String>,
    pub reply_date: Option<DateTime<Utc>>,
    /// Set only when the restaurant is removed
    #[serde(default)]
    pub hidden: bool,
}

impl Review {
    pub fn write(author: &str, text: &str, now: DateTime<Utc>) -> AppResult<Self> {
        let author = author.trim();
        let text = text.trim();
        if author.is_empty() {
            return Err(AppError::validation("Review author is required"));
        }
        if text.is_empty() {
            return Err(AppError::validation("Review text is required"));
        }

        Ok(Self {
            user: author.to_string(),
            text: text.to_string(),
            date: now,
            reply: None,
            reply_date: None,
            hidden: false,
        })
    }

    /// Attach the owner's reply. A reply is never overwritten.
    pub fn set_reply(&mut self, text: &str, now: DateTime<Utc>) -> AppResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Reply text is required"));
        }
        if self.reply.is_some() {
            return Err(AppError::invalid_state("Review already has a reply"));
        }
        self.reply = Some(text.to_string());
        self.reply_date = Some(now);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// Position in the restaurant's review list, used to address replies
    pub index: usize,
    pub user: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub reply: Option<String>,
    pub reply_date: Option<DateTime<Utc>>,
}

impl ReviewResponse {
    pub fn new(index: usize, review: Review) -> Self {
        Self {
            index,
            user: review.user,
            text: review.text,
            date: review.date,
            reply: review.reply,
            reply_date: review.reply_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_requires_text() {
        assert!(Review::write("c@example.com", "   ", Utc::now()).is_err());
        let review = Review::write("c@example.com", " Great pasta ", Utc::now()).unwrap();
        assert_eq!(review.text, "Great pasta");
        assert!(!review.hidden);
        assert!(review.reply.is_none());
    }

    #[test]
    fn test_reply_is_not_overwritten() {
        let mut review = Review::write("c@example.com", "Great pasta", Utc::now()).unwrap();
        review.set_reply("Thanks!", Utc::now()).unwrap();

        let second = review.set_reply("Edited", Utc::now());
        assert!(matches!(second, Err(AppError::InvalidState(_))));
        assert_eq!(review.reply.as_deref(), Some("Thanks!"));
        assert!(review.reply_date.is_some());
    }
}
