use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Flight Price Tracker API is running!" }))
}

async fn health() -> &'static str {
    info!("GET /health - Health check");
    "OK"
}
