//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that validates the payload; every failure is a
/// `WrongInputFormat`.
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
            .map_err(|e| AppError::wrong_input(e.body_text()))?;

        value.validate().map_err(|e| {
            // Report the first failing field
            let message = e
                .field_errors()
                .iter()
                .next()
                .map(|(field, errors)| {
                    errors
                        .first()
                        .and_then(|error| error.message.as_ref())
                        .map(|msg| format!("{field}: {msg}"))
                        .unwrap_or_else(|| format!("{field}: invalid value"))
                })
                .unwrap_or_else(|| "validation failed".to_string());
            AppError::wrong_input(message)
        })?;

        Ok(ValidatedJson(value))
    }
}
