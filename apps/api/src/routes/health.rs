use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status with version and whether the counselling model is wired in.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "model_configured": state.advisor.has_model(),
        "knowledge_loaded": state.knowledge.snapshot().base().is_some()
    }))
}
