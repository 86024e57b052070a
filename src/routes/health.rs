use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

/// GET /
///
/// Liveness probe.
async fn root() -> Json<Value> {
    info!("GET / - Health check");
    Json(json!({ "status": "AI Service is Running" }))
}
