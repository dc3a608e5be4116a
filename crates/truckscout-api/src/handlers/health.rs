//! Liveness endpoint.

use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Report service health, dataset size and the configured chat model.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy")))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "companies": state.dataset.len(),
        "chat_model": state.chat.model_name(),
    }))
}
