use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use clothswap_core::CoreError;
use clothswap_n8n::ForwardError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ForwardError`] for
/// upstream failures. Implements [`IntoResponse`] to produce the
/// relay's public error shape: a JSON body with a single `error` field.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clothswap-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A forwarding failure (missing strategy field, storage, worker).
    #[error(transparent)]
    Forward(#[from] ForwardError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(_) | CoreError::MissingField(_) => {
                    (StatusCode::BAD_REQUEST, core.to_string())
                }
                // Extraction belongs to the client; reaching here means a bug.
                CoreError::Extraction => {
                    (StatusCode::INTERNAL_SERVER_ERROR, core.to_string())
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // --- Forwarding failures ---
            AppError::Forward(forward) => match forward {
                ForwardError::MissingField(_) => (StatusCode::BAD_REQUEST, forward.to_string()),
                ForwardError::Storage(_) | ForwardError::Api(_) => {
                    tracing::error!(error = %forward, "Upstream forwarding failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, forward.to_string())
                }
            },

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
