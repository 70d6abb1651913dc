use super::error::{ProviderError, ProviderErrorCause, SynthesisError};
use super::normalizer::normalize;
use super::provider::TtsProvider;
use crate::infrastructure::adapters::{ProviderRegistry, TtsAdapter};
use crate::infrastructure::audio::PostProcessor;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// One bulletin-synthesis request. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Non-empty bulletin text, exactly as produced by the summarizer.
    pub text: String,
    /// Tier to start the fallback chain at.
    pub provider: TtsProvider,
    /// Provider-specific voice selector (voice ID, voice name or locale TLD).
    pub voice: Option<String>,
}

/// Terminal outcome of a request. Exactly one per request; `provider_used`
/// is `None` only for the plain-text transcript fallback.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub output_path: PathBuf,
    pub is_audio: bool,
    pub provider_used: Option<TtsProvider>,
}

/// The fallback router.
///
/// Walks the fixed tier ordering starting at the requested tier, skipping
/// tiers whose adapter is absent from the registry, and escalating on any
/// adapter failure. Guaranteed to terminate in a [`SynthesisResult`]: when
/// every tier fails, the original input text is written to a sibling `.txt`
/// file instead of raising.
pub struct SynthesisService {
    registry: Arc<ProviderRegistry>,
    post_processor: PostProcessor,
    output_dir: PathBuf,
    premium_timeout: Duration,
    free_timeout: Duration,
}

impl SynthesisService {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        post_processor: PostProcessor,
        output_dir: PathBuf,
        premium_timeout: Duration,
        free_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            post_processor,
            output_dir,
            premium_timeout,
            free_timeout,
        }
    }

    /// Synthesize `request.text` into an audio file, or a plain-text
    /// transcript when every tier fails.
    ///
    /// The only caller-visible failures are the empty-input precondition and
    /// an I/O failure preparing the output directory or writing the terminal
    /// transcript itself.
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResult, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(SynthesisError::OutputDir)?;

        let base_name = format!("boletim_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let speech_text = normalize(&request.text);

        tracing::info!(
            requested_provider = %request.provider,
            text_length = request.text.len(),
            speech_length = speech_text.len(),
            base_name = %base_name,
            "Starting bulletin synthesis"
        );

        for &provider in request.provider.fallback_chain() {
            let Some(adapter) = self.registry.get(provider) else {
                // Credential absent: the tier was never registered. Skip
                // without a doomed network round-trip.
                let reason = ProviderError::new(provider, ProviderErrorCause::MissingCredential);
                tracing::info!(
                    provider = %provider,
                    reason = %reason,
                    "Tier unavailable, escalating without an attempt"
                );
                continue;
            };

            match self
                .attempt(adapter.as_ref(), provider, &speech_text, &request, &base_name)
                .await
            {
                Ok(output_path) => {
                    tracing::info!(
                        provider_used = %provider,
                        path = %output_path.display(),
                        "Bulletin audio generated"
                    );
                    return Ok(SynthesisResult {
                        output_path,
                        is_audio: true,
                        provider_used: Some(provider),
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        provider = %provider,
                        error = %error,
                        "Synthesis attempt failed, escalating to next tier"
                    );
                }
            }
        }

        // Exhausted: the hard guarantee. Write the original, pre-normalization
        // text so nothing the caller submitted is lost.
        let transcript_path = self.output_dir.join(format!("{base_name}.txt"));
        tokio::fs::write(&transcript_path, request.text.as_bytes())
            .await
            .map_err(SynthesisError::FallbackWrite)?;

        tracing::warn!(
            path = %transcript_path.display(),
            "All synthesis tiers exhausted, wrote plain-text transcript"
        );

        Ok(SynthesisResult {
            output_path: transcript_path,
            is_audio: false,
            provider_used: None,
        })
    }

    /// Run one adapter attempt end to end: synthesize into a scratch path,
    /// then promote it to the final `.mp3` path (speeding up gTTS output on
    /// the way when possible).
    async fn attempt(
        &self,
        adapter: &dyn TtsAdapter,
        provider: TtsProvider,
        speech_text: &str,
        request: &SynthesisRequest,
        base_name: &str,
    ) -> Result<PathBuf, ProviderError> {
        let scratch_path = self
            .output_dir
            .join(format!(".{base_name}.{provider}.part"));
        let final_path = self.output_dir.join(format!("{base_name}.mp3"));
        let deadline = self.attempt_timeout(provider);

        let attempt_result = tokio::time::timeout(
            deadline,
            adapter.synthesize(speech_text, request.voice.as_deref(), &scratch_path),
        )
        .await;

        let produced_path = match attempt_result {
            Ok(Ok(path)) => path,
            Ok(Err(error)) => {
                let _ = tokio::fs::remove_file(&scratch_path).await;
                return Err(error);
            }
            Err(_) => {
                let _ = tokio::fs::remove_file(&scratch_path).await;
                return Err(ProviderError::new(
                    provider,
                    ProviderErrorCause::Timeout(deadline),
                ));
            }
        };

        self.promote(provider, &produced_path, &final_path)
            .await
            .map_err(|e| ProviderError::new(provider, ProviderErrorCause::Io(e)))?;

        Ok(final_path)
    }

    /// Promote a finished scratch file to the final path. The final path
    /// only ever appears through this rename, so partially written files are
    /// never mistaken for complete results.
    async fn promote(
        &self,
        provider: TtsProvider,
        scratch_path: &std::path::Path,
        final_path: &std::path::Path,
    ) -> std::io::Result<()> {
        if provider.capability().supports_speed_control && self.post_processor.is_active() {
            match self.post_processor.speed_up(scratch_path, final_path).await {
                Ok(_) => {
                    let _ = tokio::fs::remove_file(scratch_path).await;
                    return Ok(());
                }
                Err(error) => {
                    // Non-fatal: keep the synthesized audio at its natural
                    // speed rather than discard a successful attempt.
                    tracing::warn!(
                        provider = %provider,
                        error = %error,
                        "Playback speed adjustment failed, keeping original audio"
                    );
                }
            }
        }

        tokio::fs::rename(scratch_path, final_path).await
    }

    fn attempt_timeout(&self, provider: TtsProvider) -> Duration {
        match provider {
            TtsProvider::ElevenLabs | TtsProvider::OpenAi => self.premium_timeout,
            TtsProvider::Gtts => self.free_timeout,
        }
    }
}
