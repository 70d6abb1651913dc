use crate::domain::synthesis::{ProviderError, TtsProvider};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Uniform contract around one vendor's synthesis API.
///
/// Implementations are responsible for:
/// - Issuing the vendor call(s) and buffering the binary audio response
/// - Splitting text into batches when the vendor caps request length
/// - Writing the MP3 bytes verbatim to `destination` (a scratch path owned
///   by the router; the final path only appears after a successful rename)
///
/// Any failure (non-2xx status, network timeout, empty body, local write
/// error) is reported as a [`ProviderError`] so the router can escalate.
#[async_trait]
pub trait TtsAdapter: Send + Sync {
    /// The tier this adapter implements.
    fn provider(&self) -> TtsProvider;

    /// Synthesize `text` to `destination` and return the produced path.
    ///
    /// `voice` is provider-specific and opaque to the router: an ElevenLabs
    /// voice ID, an OpenAI voice name, or a gTTS locale TLD.
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        destination: &Path,
    ) -> Result<PathBuf, ProviderError>;
}
