use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Output directory for generated bulletins
    pub audio_dir: PathBuf,
    // ElevenLabs (premium tier). An absent key marks the tier unavailable.
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,
    // OpenAI (standard tier). An absent key marks the tier unavailable.
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Google Translate TTS (free terminal tier)
    pub gtts_default_tld: String,
    // Post-processing
    pub playback_speed: f32,
    // Per-attempt deadlines so a stuck call cannot delay fallback
    pub premium_timeout_secs: u64,
    pub free_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            audio_dir: env::var("AUDIO_DIR")
                .unwrap_or_else(|_| "./audio".to_string())
                .into(),
            elevenlabs_api_key: optional_secret("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: env::var("ELEVENLABS_VOICE_ID")
                .unwrap_or_else(|_| "21m00Tcm4TlvDq8ikWAM".to_string()),
            elevenlabs_model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| "eleven_multilingual_v2".to_string()),
            openai_api_key: optional_secret("OPENAI_API_KEY"),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            gtts_default_tld: env::var("GTTS_DEFAULT_TLD")
                .unwrap_or_else(|_| "com.br".to_string()),
            playback_speed: env::var("PLAYBACK_SPEED")
                .unwrap_or_else(|_| "1.15".to_string())
                .parse()?,
            premium_timeout_secs: env::var("PREMIUM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            free_timeout_secs: env::var("FREE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// A secret that may legitimately be absent. An unset or empty variable
/// marks the tier unavailable instead of failing startup.
fn optional_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
