use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
///
/// Every failure in the planning pipeline collapses into this type at the handler
/// boundary. Whatever the variant, the client receives `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Plan generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected planning request: {msg}");
                StatusCode::BAD_REQUEST
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                StatusCode::BAD_GATEWAY
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
