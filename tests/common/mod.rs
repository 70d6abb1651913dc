use async_trait::async_trait;
use boletim_backend::domain::synthesis::{
    ProviderError, ProviderErrorCause, SynthesisService, TtsProvider,
};
use boletim_backend::infrastructure::adapters::{ProviderRegistry, TtsAdapter};
use boletim_backend::infrastructure::audio::PostProcessor;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Not a valid MP3 stream on purpose: ffmpeg must reject it so the
/// post-processing failure path is exercised deterministically.
pub const FAKE_AUDIO: &[u8] = b"ID3\x03\x00fake-bulletin-audio";

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Write fake audio bytes to the destination and succeed.
    Succeed,
    /// Fail immediately with a provider error.
    Fail,
    /// Never answer within any reasonable deadline.
    Hang,
}

/// Scripted adapter recording every invocation, shared across tiers through
/// a common call log so escalation order is observable.
pub struct MockAdapter {
    provider: TtsProvider,
    behavior: MockBehavior,
    pub calls: AtomicUsize,
    call_log: Arc<Mutex<Vec<TtsProvider>>>,
}

impl MockAdapter {
    pub fn new(
        provider: TtsProvider,
        behavior: MockBehavior,
        call_log: Arc<Mutex<Vec<TtsProvider>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            behavior,
            calls: AtomicUsize::new(0),
            call_log,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsAdapter for MockAdapter {
    fn provider(&self) -> TtsProvider {
        self.provider
    }

    async fn synthesize(
        &self,
        _text: &str,
        _voice: Option<&str>,
        destination: &Path,
    ) -> Result<PathBuf, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_log.lock().push(self.provider);

        match self.behavior {
            MockBehavior::Succeed => {
                tokio::fs::write(destination, FAKE_AUDIO).await.unwrap();
                Ok(destination.to_path_buf())
            }
            MockBehavior::Fail => Err(ProviderError::new(
                self.provider,
                ProviderErrorCause::EmptyAudio,
            )),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Err(ProviderError::new(
                    self.provider,
                    ProviderErrorCause::EmptyAudio,
                ))
            }
        }
    }
}

/// A router wired to mock adapters inside a scratch output directory.
pub struct TestRouter {
    pub service: SynthesisService,
    pub output_dir: tempfile::TempDir,
    pub call_log: Arc<Mutex<Vec<TtsProvider>>>,
}

impl TestRouter {
    pub fn calls(&self) -> Vec<TtsProvider> {
        self.call_log.lock().clone()
    }
}

pub fn build_router(adapters: &[Arc<MockAdapter>], playback_speed: f32) -> TestRouter {
    let output_dir = tempfile::tempdir().unwrap();
    let call_log = adapters
        .first()
        .map(|adapter| adapter.call_log.clone())
        .unwrap_or_default();

    let mut registry = ProviderRegistry::new();
    for adapter in adapters {
        registry.register(adapter.clone());
    }

    let service = SynthesisService::new(
        Arc::new(registry),
        PostProcessor::new(playback_speed),
        output_dir.path().to_path_buf(),
        Duration::from_millis(200),
        Duration::from_millis(500),
    );

    TestRouter {
        service,
        output_dir,
        call_log,
    }
}

pub fn shared_call_log() -> Arc<Mutex<Vec<TtsProvider>>> {
    Arc::new(Mutex::new(Vec::new()))
}
