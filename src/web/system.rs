use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::web::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": timestamp,
                "uptime_seconds": uptime_seconds,
            })),
        ),
        Err(e) => {
            tracing::error!("Database health check failed: {e:#}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": timestamp,
                    "uptime_seconds": uptime_seconds,
                })),
            )
        }
    }
}
