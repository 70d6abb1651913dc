pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    audio::AudioController, health, synthesis::SynthesisController,
};
use crate::infrastructure::adapters::ProviderRegistry;
use crate::infrastructure::config::Config;
use self::request_id::request_id_middleware;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    registry: Arc<ProviderRegistry>,
    synthesis_controller: Arc<SynthesisController>,
    audio_controller: Arc<AudioController>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Synthesis routes
    let synthesis_routes = Router::new()
        .route("/api/synthesize", post(SynthesisController::synthesize))
        .route("/api/voices", get(SynthesisController::list_voices))
        .with_state(synthesis_controller);

    // Generated-file routes
    let audio_routes = Router::new()
        .route("/api/audio", get(AudioController::list))
        .route("/api/audio/:filename", get(AudioController::download))
        .with_state(audio_controller);

    // Build application routes
    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(registry)
        .merge(synthesis_routes)
        .merge(audio_routes)
        .layer(middleware::from_fn(request_id_middleware))
        // The bulletin player is a browser frontend on another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
