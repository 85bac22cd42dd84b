use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// Liveness plus which storage tier is answering writes.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let storage = if state.store.database_active() {
        "database"
    } else if state.store.database_configured() {
        "database-unavailable"
    } else if state.config.deployment.production {
        "read-only"
    } else {
        "filesystem"
    };
    Json(json!({ "status": "ok", "storage": storage }))
}
