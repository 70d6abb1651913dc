use super::elevenlabs::ElevenLabsAdapter;
use super::gtts::GttsAdapter;
use super::openai::OpenAiAdapter;
use super::tts_adapter::TtsAdapter;
use crate::domain::synthesis::{ProviderCapability, TtsProvider};
use crate::infrastructure::config::Config;
use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use std::sync::Arc;

/// The set of attemptable tiers, resolved once at process start.
///
/// Adapters whose credential is not configured are simply never registered:
/// the router iterates only present entries, so a missing credential costs
/// no network round-trip and is never a startup error.
pub struct ProviderRegistry {
    entries: Vec<Arc<dyn TtsAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build the registry from configuration. The gTTS tier is always
    /// present; the premium tiers require their API key.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        let http_client = reqwest::Client::new();

        match &config.elevenlabs_api_key {
            Some(api_key) => registry.register(Arc::new(ElevenLabsAdapter::new(
                http_client.clone(),
                api_key.clone(),
                config.elevenlabs_voice_id.clone(),
                config.elevenlabs_model_id.clone(),
            ))),
            None => tracing::warn!(
                provider = "elevenlabs",
                "API key not configured, tier unavailable"
            ),
        }

        match &config.openai_api_key {
            Some(api_key) => {
                let client = OpenAiClient::with_config(
                    OpenAIConfig::new().with_api_key(api_key.clone()),
                );
                registry.register(Arc::new(OpenAiAdapter::new(
                    Arc::new(client),
                    config.openai_tts_model.clone(),
                    config.openai_tts_voice.clone(),
                )));
            }
            None => tracing::warn!(
                provider = "openai",
                "API key not configured, tier unavailable"
            ),
        }

        registry.register(Arc::new(GttsAdapter::new(
            http_client,
            config.gtts_default_tld.clone(),
        )));

        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn TtsAdapter>) {
        self.entries.push(adapter);
    }

    pub fn get(&self, provider: TtsProvider) -> Option<Arc<dyn TtsAdapter>> {
        self.entries
            .iter()
            .find(|adapter| adapter.provider() == provider)
            .cloned()
    }

    /// Capabilities of every registered tier, in fallback order.
    pub fn available(&self) -> Vec<ProviderCapability> {
        crate::domain::synthesis::FALLBACK_ORDER
            .iter()
            .filter(|provider| self.get(**provider).is_some())
            .map(|provider| provider.capability())
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
