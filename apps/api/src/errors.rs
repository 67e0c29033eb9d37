use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::layout::Column;

/// Errors raised by the pagination engine itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{column} column exceeded the {limit}-page limit; {dropped_units} content units did not fit")]
    PageLimitExceeded {
        column: Column,
        limit: usize,
        dropped_units: usize,
    },

    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    #[allow(dead_code)]
    Validation(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Layout(e) => {
                tracing::warn!("Layout error: {e}");
                let code = match e {
                    LayoutError::PageLimitExceeded { .. } => "PAGE_LIMIT_EXCEEDED",
                    LayoutError::InvalidConfig(_) => "INVALID_LAYOUT_CONFIG",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
