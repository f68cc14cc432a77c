use axum::Json;
use serde_json::{Value, json};

/// GET /health
///
/// Liveness check; never touches the model provider.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
