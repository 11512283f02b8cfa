use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and whether remote generation is wired up.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let remote = if state.remote.is_configured() {
        "configured"
    } else {
        "disabled"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "rfp-wizard-api",
        "remoteGeneration": remote
    }))
}
