use super::provider::TtsProvider;
use std::time::Duration;

/// Failure of a single adapter attempt. Triggers escalation to the next
/// tier; never crosses the router boundary.
#[derive(Debug, thiserror::Error)]
#[error("{provider} synthesis failed: {cause}")]
pub struct ProviderError {
    pub provider: TtsProvider,
    #[source]
    pub cause: ProviderErrorCause,
}

impl ProviderError {
    pub fn new(provider: TtsProvider, cause: ProviderErrorCause) -> Self {
        Self { provider, cause }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderErrorCause {
    #[error("credential not configured")]
    MissingCredential,
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider returned an empty audio body")]
    EmptyAudio,
    #[error("provider API error: {0}")]
    Api(String),
    #[error("audio write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors the router is allowed to surface to its caller. Provider failures
/// are resolved internally by escalation and the plain-text terminal
/// fallback; only the empty-input precondition and a failure to write that
/// terminal transcript remain.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("text cannot be empty")]
    EmptyText,
    #[error("could not prepare output directory: {0}")]
    OutputDir(std::io::Error),
    #[error("failed to write fallback transcript: {0}")]
    FallbackWrite(std::io::Error),
}
