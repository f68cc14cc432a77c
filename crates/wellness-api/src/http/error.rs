//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use wellness_types::error::PipelineError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read as a chat request.
    Validation(String),
    /// A pipeline stage failed.
    Upstream(PipelineError),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Upstream(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Upstream(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            AppError::Validation(_) => tracing::warn!(%status, %detail, "Rejected request"),
            AppError::Upstream(err) => {
                tracing::error!(%status, stage = %err.stage, error = ?err.source, "Pipeline failed")
            }
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
