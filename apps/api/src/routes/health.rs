use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::ScoringMode;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and scoring mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let scoring_mode = match state.config.scoring_mode {
        ScoringMode::Llm => "llm",
        ScoringMode::Demo => "demo",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "bora-api",
        "scoringMode": scoring_mode
    }))
}
