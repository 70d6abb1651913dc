pub mod error;
pub mod normalizer;
pub mod provider;
pub mod service;

pub use error::{ProviderError, ProviderErrorCause, SynthesisError};
pub use normalizer::normalize;
pub use provider::{ProviderCapability, TtsProvider, FALLBACK_ORDER};
pub use service::{SynthesisRequest, SynthesisResult, SynthesisService};
