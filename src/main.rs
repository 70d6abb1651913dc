use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boletim_backend::controllers::audio::AudioController;
use boletim_backend::controllers::synthesis::SynthesisController;
use boletim_backend::domain::synthesis::SynthesisService;
use boletim_backend::infrastructure::adapters::ProviderRegistry;
use boletim_backend::infrastructure::audio::PostProcessor;
use boletim_backend::infrastructure::config::{Config, LogFormat};
use boletim_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Boletim Backend on {}:{}",
        config.host,
        config.port
    );

    // Make sure the output directory exists before the first request
    tokio::fs::create_dir_all(&config.audio_dir).await?;
    tracing::info!(audio_dir = %config.audio_dir.display(), "Output directory ready");

    // Resolve the available synthesis tiers once at startup
    let registry = Arc::new(ProviderRegistry::from_config(&config));
    let tiers: Vec<String> = registry
        .available()
        .iter()
        .map(|capability| capability.provider.to_string())
        .collect();
    tracing::info!(tiers = ?tiers, "Synthesis tiers registered");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the fallback router (inject registry and post-processor)
    tracing::info!("Instantiating synthesis service...");
    let synthesis_service = Arc::new(SynthesisService::new(
        registry.clone(),
        PostProcessor::new(config.playback_speed),
        config.audio_dir.clone(),
        Duration::from_secs(config.premium_timeout_secs),
        Duration::from_secs(config.free_timeout_secs),
    ));

    // 2. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let synthesis_controller = Arc::new(SynthesisController::new(
        synthesis_service,
        registry.clone(),
    ));
    let audio_controller = Arc::new(AudioController::new(config.audio_dir.clone()));

    // Start HTTP server with all routes
    start_http_server(config, registry, synthesis_controller, audio_controller)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "boletim_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "boletim_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
