//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body that has passed its `validator` rules.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct ReasonRequest {
///     #[validate(length(min = 1))]
///     reason: String,
/// }
///
/// async fn reject(ValidatedJson(payload): ValidatedJson<ReasonRequest>) {
///     // payload.reason is non-empty here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid JSON body: {}", e.body_text())))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Join field errors into one message, in field-name order
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Item {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, message = "Quantity must be at least 1"))]
        quantity: u32,
    }

    async fn extract(body: &str) -> Result<ValidatedJson<Item>, AppError> {
        let request = axum::http::Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        ValidatedJson::<Item>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(item) = extract(r#"{"name":"Spaghetti","quantity":2}"#)
            .await
            .unwrap();
        assert_eq!(item.name, "Spaghetti");
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_messages_are_joined_in_field_order() {
        let err = extract(r#"{"name":"","quantity":0}"#).await.err().unwrap();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Name is required, Quantity must be at least 1")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let err = extract("{not json").await.err().unwrap();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("Invalid JSON body")));
    }
}
