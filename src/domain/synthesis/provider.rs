use serde::{Deserialize, Serialize};
use std::fmt;

/// One synthesis tier in the fixed fallback ordering.
///
/// The ordering is total: `elevenlabs → openai → gtts`. A request starts at
/// the tier it asked for and only ever escalates forward; `gtts` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// ElevenLabs hosted neural voices (premium).
    ElevenLabs,
    /// OpenAI `tts-1` hosted voices (standard).
    OpenAi,
    /// Google Translate TTS, no credential required.
    Gtts,
}

/// Fixed, total fallback ordering across all tiers.
pub const FALLBACK_ORDER: [TtsProvider; 3] =
    [TtsProvider::ElevenLabs, TtsProvider::OpenAi, TtsProvider::Gtts];

/// Static description of one adapter, used by the router to decide whether a
/// tier is attemptable before invoking it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProviderCapability {
    #[serde(rename = "name")]
    pub provider: TtsProvider,
    pub requires_credential: bool,
    pub supports_speed_control: bool,
}

impl TtsProvider {
    /// The escalation chain starting at this tier. Tiers before the
    /// requested one are never part of the chain.
    pub fn fallback_chain(self) -> &'static [TtsProvider] {
        match self {
            TtsProvider::ElevenLabs => &FALLBACK_ORDER[..],
            TtsProvider::OpenAi => &FALLBACK_ORDER[1..],
            TtsProvider::Gtts => &FALLBACK_ORDER[2..],
        }
    }

    pub fn capability(self) -> ProviderCapability {
        match self {
            TtsProvider::ElevenLabs => ProviderCapability {
                provider: self,
                requires_credential: true,
                supports_speed_control: false,
            },
            TtsProvider::OpenAi => ProviderCapability {
                provider: self,
                requires_credential: true,
                supports_speed_control: false,
            },
            // gTTS speaks noticeably slower than the hosted voices, so its
            // output is the only one routed through the post-processor.
            TtsProvider::Gtts => ProviderCapability {
                provider: self,
                requires_credential: false,
                supports_speed_control: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TtsProvider::ElevenLabs => "elevenlabs",
            TtsProvider::OpenAi => "openai",
            TtsProvider::Gtts => "gtts",
        }
    }
}

impl fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_top_tier_covers_all_tiers() {
        assert_eq!(
            TtsProvider::ElevenLabs.fallback_chain(),
            &[TtsProvider::ElevenLabs, TtsProvider::OpenAi, TtsProvider::Gtts]
        );
    }

    #[test]
    fn test_chain_never_includes_earlier_tiers() {
        assert_eq!(
            TtsProvider::OpenAi.fallback_chain(),
            &[TtsProvider::OpenAi, TtsProvider::Gtts]
        );
        assert_eq!(TtsProvider::Gtts.fallback_chain(), &[TtsProvider::Gtts]);
    }

    #[test]
    fn test_free_tier_is_terminal() {
        let chain = TtsProvider::Gtts.fallback_chain();
        assert_eq!(chain.last(), Some(&TtsProvider::Gtts));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&TtsProvider::ElevenLabs).unwrap(),
            "\"elevenlabs\""
        );
        let parsed: TtsProvider = serde_json::from_str("\"gtts\"").unwrap();
        assert_eq!(parsed, TtsProvider::Gtts);
    }

    #[test]
    fn test_only_free_tier_supports_speed_control() {
        assert!(!TtsProvider::ElevenLabs.capability().supports_speed_control);
        assert!(!TtsProvider::OpenAi.capability().supports_speed_control);
        assert!(TtsProvider::Gtts.capability().supports_speed_control);
        assert!(!TtsProvider::Gtts.capability().requires_credential);
    }
}
