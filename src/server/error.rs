//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::core::{CardNumber, CatalogError, NumberError};

/// Errors returned by the API handlers.
///
/// Rendered as `{"error": "<message>"}` with the matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadNumber(#[from] NumberError),

    #[error("no card for number {0}")]
    NotFound(CardNumber),

    #[error("no variant of {number} matches '{filename}'")]
    NoSuchVariant { number: CardNumber, filename: String },

    #[error("reload failed: {0}")]
    Reload(#[from] CatalogError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadNumber(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::NoSuchVariant { .. } => StatusCode::NOT_FOUND,
            ApiError::Reload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
