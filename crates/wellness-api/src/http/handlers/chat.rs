//! Chat handler: one request runs the whole wellness pipeline.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use wellness_types::chat::{ChatRequest, ChatResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chat
///
/// Body: `{"message": "...", "session_id": "..."}` (`session_id` optional,
/// defaults to `"default"`). Responds with the responder reply plus the raw
/// sentiment and safety classifier outputs.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;

    tracing::debug!(
        session_id = %request.session_id,
        len = request.message.len(),
        "Chat request"
    );

    let response = state
        .pipeline
        .run(&request.message, &request.session_id)
        .await?;

    Ok(Json(response))
}
