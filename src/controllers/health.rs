use crate::infrastructure::adapters::ProviderRegistry;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(registry): State<Arc<ProviderRegistry>>) -> impl IntoResponse {
    let tiers: Vec<String> = registry
        .available()
        .iter()
        .map(|capability| capability.provider.to_string())
        .collect();

    // The gTTS tier is always registered, so readiness never depends on
    // premium credentials being present.
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts_tiers": tiers,
        })),
    )
}
