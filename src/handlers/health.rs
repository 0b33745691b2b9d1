// handlers/health.rs - GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// 200 when the store answers a ping, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
