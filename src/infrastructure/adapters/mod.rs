pub mod elevenlabs;
pub mod gtts;
pub mod openai;
pub mod registry;
pub mod tts_adapter;

pub use elevenlabs::ElevenLabsAdapter;
pub use gtts::GttsAdapter;
pub use openai::OpenAiAdapter;
pub use registry::ProviderRegistry;
pub use tts_adapter::TtsAdapter;
