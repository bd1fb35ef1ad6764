//! Error-class to status-code mapping.
//!
//! The core's taxonomy collapses to three wire classes: not-found → 404,
//! schema violation → 400, anything else → 500. Bodies carry the FastAPI-era
//! `{"detail": ...}` shape the frontend already understands.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marketlens_core::DataError;
use serde_json::json;
use tracing::error;

pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_schema_violation() {
            StatusCode::BAD_REQUEST
        } else {
            error!(%err, "unexpected data error");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
