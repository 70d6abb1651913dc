use super::tts_adapter::TtsAdapter;
use crate::domain::synthesis::{ProviderError, ProviderErrorCause, TtsProvider};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const API_BASE: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// ElevenLabs neural-voice adapter (premium tier).
///
/// One POST per request: the voice ID goes in the URL, the text and a fixed
/// model identifier in the JSON body, the API key in the `xi-api-key` header.
pub struct ElevenLabsAdapter {
    client: reqwest::Client,
    api_key: String,
    default_voice_id: String,
    model_id: String,
}

impl ElevenLabsAdapter {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        default_voice_id: String,
        model_id: String,
    ) -> Self {
        Self {
            client,
            api_key,
            default_voice_id,
            model_id,
        }
    }

    fn error(&self, cause: ProviderErrorCause) -> ProviderError {
        ProviderError::new(TtsProvider::ElevenLabs, cause)
    }
}

#[async_trait]
impl TtsAdapter for ElevenLabsAdapter {
    fn provider(&self) -> TtsProvider {
        TtsProvider::ElevenLabs
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        destination: &Path,
    ) -> Result<PathBuf, ProviderError> {
        let start_time = std::time::Instant::now();
        let voice_id = voice.unwrap_or(&self.default_voice_id);

        tracing::info!(
            voice_id = voice_id,
            model_id = %self.model_id,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling ElevenLabs text-to-speech API"
        );

        let response = self
            .client
            .post(format!("{API_BASE}/{voice_id}"))
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.model_id,
            }))
            .send()
            .await
            .map_err(|e| self.error(ProviderErrorCause::Network(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                voice_id = voice_id,
                "ElevenLabs API returned an error status"
            );
            return Err(self.error(ProviderErrorCause::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| self.error(ProviderErrorCause::Network(e)))?;
        if audio_bytes.is_empty() {
            return Err(self.error(ProviderErrorCause::EmptyAudio));
        }

        tokio::fs::write(destination, &audio_bytes)
            .await
            .map_err(|e| self.error(ProviderErrorCause::Io(e)))?;

        tracing::info!(
            provider = "elevenlabs",
            voice_id = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(destination.to_path_buf())
    }
}
