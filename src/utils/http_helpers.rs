use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// The error taxonomy for the HTTP boundary. Every handler-level failure is
/// mapped here and converted to a status code plus a JSON `message` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed in the request body.
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    UserExists,
    /// Covers both unknown email and wrong password, so a caller cannot
    /// tell registered addresses apart from unregistered ones.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Missing, malformed, expired, or forged bearer token.
    #[error("Authentication required")]
    Unauthenticated,
    /// Authenticated but not an admin.
    #[error("Admin access required")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Unexpected persistence failure. Detail is logged, never sent to
    /// the client.
    #[error("Server error")]
    Storage(#[from] StoreError),
    #[error("Server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UserExists | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => error!("Storage failure: {}", e),
            ApiError::Internal(detail) => error!("Internal error: {}", detail),
            _ => {}
        }
        let body = MessageResponse {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Generic `{"message": ...}` body used for errors and simple successes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Request payloads that know how to check their own required fields.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Collects the names of empty required fields into a single error.
pub fn require_non_empty(fields: &[(&str, &str)]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}

/// A JSON extractor that rejects with a 400 `ValidationError` instead of
/// axum's default 422, and runs the payload's [`Validate`] impl so
/// malformed data never reaches the store.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        value.validate().map_err(ApiError::Validation)?;
        Ok(ValidatedJson(value))
    }
}
