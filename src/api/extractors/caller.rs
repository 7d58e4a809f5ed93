//! Caller extractor - identifies the acting user from the request header.
//!
//! Sessions are handled outside this service; the fronting layer forwards
//! the authenticated email in `x-user-email`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::config::CALLER_HEADER;
use crate::errors::AppError;

/// Email of the user performing the request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by middleware
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(caller.clone());
        }

        parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(|email| Caller(email.to_string()))
            .ok_or_else(|| AppError::validation(format!("{} header is required", CALLER_HEADER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<Caller, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(CALLER_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Caller::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_reads_trimmed_header() {
        let caller = extract(Some(" owner@example.com ")).await.unwrap();
        assert_eq!(caller, Caller("owner@example.com".into()));
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_rejected() {
        assert!(matches!(extract(None).await, Err(AppError::Validation(_))));
        assert!(matches!(extract(Some("  ")).await, Err(AppError::Validation(_))));
    }
}
