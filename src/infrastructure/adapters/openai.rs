use super::tts_adapter::TtsAdapter;
use crate::domain::synthesis::{ProviderError, ProviderErrorCause, TtsProvider};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// OpenAI text-to-speech adapter (standard neural tier).
///
/// One `audio().speech()` call per request with a fixed model; the response
/// is buffered MP3 and written verbatim to the destination path.
pub struct OpenAiAdapter {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiAdapter {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    fn error(&self, cause: ProviderErrorCause) -> ProviderError {
        ProviderError::new(TtsProvider::OpenAi, cause)
    }

    /// Map a voice selector to the API's closed voice set. Unrecognized
    /// values fall back to the configured default.
    fn resolve_voice(&self, voice: Option<&str>) -> Voice {
        let name = voice.unwrap_or(&self.default_voice);
        match name.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }
}

#[async_trait]
impl TtsAdapter for OpenAiAdapter {
    fn provider(&self) -> TtsProvider {
        TtsProvider::OpenAi
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        destination: &Path,
    ) -> Result<PathBuf, ProviderError> {
        let start_time = std::time::Instant::now();
        let voice_enum = self.resolve_voice(voice);

        tracing::info!(
            model = %self.model,
            voice = ?voice_enum,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling OpenAI TTS API"
        );

        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice: voice_enum,
            response_format: None, // Defaults to MP3
            speed: None,           // Defaults to 1.0
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            self.error(ProviderErrorCause::Api(e.to_string()))
        })?;

        let audio_bytes = response.bytes.to_vec();
        if audio_bytes.is_empty() {
            return Err(self.error(ProviderErrorCause::EmptyAudio));
        }

        tokio::fs::write(destination, &audio_bytes)
            .await
            .map_err(|e| self.error(ProviderErrorCause::Io(e)))?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(destination.to_path_buf())
    }
}
