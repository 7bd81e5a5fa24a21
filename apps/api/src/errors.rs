use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::generator::FollowupError;
use crate::models::envelope::ApiEnvelope;

pub const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a failure `ApiEnvelope`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Inbound payload rejected before any model call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Followup(#[from] FollowupError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            AppError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiEnvelope::failure(VALIDATION_FAILED_MESSAGE, Some(json!({ "detail": detail }))),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiEnvelope::failure(METHOD_NOT_ALLOWED_MESSAGE, None),
            ),
            AppError::Followup(e) => {
                tracing::warn!(category = e.category(), "Follow-up generation failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiEnvelope::failure(e.to_string(), e.diagnostic()),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}
