use super::tts_adapter::TtsAdapter;
use crate::domain::synthesis::{ProviderError, ProviderErrorCause, TtsProvider};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The unauthenticated endpoint rejects long inputs, so text is synthesized
/// in chunks of at most this many bytes and the MP3 frames are concatenated.
const MAX_CHUNK_SIZE: usize = 200;

/// Locale TLDs the endpoint recognizes for Portuguese voice variations.
/// Anything else is normalized to the configured default.
const RECOGNIZED_TLDS: [&str; 3] = ["com.br", "pt", "com"];

const LANGUAGE: &str = "pt";

/// Google Translate TTS adapter (free terminal tier).
///
/// Speaks Portuguese through `translate.google.<tld>/translate_tts`, the
/// same endpoint the gTTS clients use. Requires no credential, which is why
/// it sits at the end of every fallback chain.
pub struct GttsAdapter {
    client: reqwest::Client,
    default_tld: String,
}

impl GttsAdapter {
    pub fn new(client: reqwest::Client, default_tld: String) -> Self {
        Self {
            client,
            default_tld,
        }
    }

    fn error(&self, cause: ProviderErrorCause) -> ProviderError {
        ProviderError::new(TtsProvider::Gtts, cause)
    }

    /// Normalize the voice selector to a recognized locale TLD.
    fn resolve_tld<'a>(&'a self, voice: Option<&'a str>) -> &'a str {
        match voice {
            Some("br") => "com.br",
            Some(tld) if RECOGNIZED_TLDS.contains(&tld) => tld,
            _ => &self.default_tld,
        }
    }

    /// Split text into endpoint-sized chunks, preferring sentence boundaries
    /// and falling back to a plain character split for any single run that
    /// exceeds the cap on its own.
    fn split_into_chunks(text: &str) -> Vec<String> {
        if text.len() <= MAX_CHUNK_SIZE {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        let sentence_pattern = regex::Regex::new(r"([.!?]+\s+)").unwrap();
        let mut last_end = 0;

        for mat in sentence_pattern.find_iter(text) {
            let sentence = &text[last_end..mat.end()];
            last_end = mat.end();

            if !current.is_empty() && current.len() + sentence.len() > MAX_CHUNK_SIZE {
                chunks.push(current.trim().to_string());
                current = String::new();
            }
            if sentence.len() > MAX_CHUNK_SIZE {
                Self::push_char_chunks(sentence, &mut chunks);
            } else {
                current.push_str(sentence);
            }
        }

        if last_end < text.len() {
            let remaining = &text[last_end..];
            if !current.is_empty() && current.len() + remaining.len() > MAX_CHUNK_SIZE {
                chunks.push(current.trim().to_string());
                current = String::new();
            }
            if remaining.len() > MAX_CHUNK_SIZE {
                Self::push_char_chunks(remaining, &mut chunks);
            } else {
                current.push_str(remaining);
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
    }

    /// Last-resort split for a run with no usable sentence boundary.
    fn push_char_chunks(text: &str, chunks: &mut Vec<String>) {
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(MAX_CHUNK_SIZE) {
            chunks.push(chunk.iter().collect());
        }
    }

    /// Fetch the MP3 bytes for a single chunk.
    async fn fetch_chunk(
        &self,
        tld: &str,
        chunk: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, ProviderError> {
        let url = format!("https://translate.google.{tld}/translate_tts");
        let total = total.to_string();
        let index = index.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", LANGUAGE),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.error(ProviderErrorCause::Network(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error(ProviderErrorCause::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.error(ProviderErrorCause::Network(e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TtsAdapter for GttsAdapter {
    fn provider(&self) -> TtsProvider {
        TtsProvider::Gtts
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        destination: &Path,
    ) -> Result<PathBuf, ProviderError> {
        let start_time = std::time::Instant::now();
        let tld = self.resolve_tld(voice);
        let chunks = Self::split_into_chunks(text);

        tracing::info!(
            tld = tld,
            chunk_count = chunks.len(),
            text_length = text.len(),
            "Calling Google Translate TTS"
        );

        let mut merged_audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.fetch_chunk(tld, chunk, index, chunks.len()).await?;
            merged_audio.extend(audio);
            tracing::debug!(
                chunk_index = index,
                total_audio_size = merged_audio.len(),
                "Chunk synthesized and merged"
            );
        }

        if merged_audio.is_empty() {
            return Err(self.error(ProviderErrorCause::EmptyAudio));
        }

        tokio::fs::write(destination, &merged_audio)
            .await
            .map_err(|e| self.error(ProviderErrorCause::Io(e)))?;

        tracing::info!(
            provider = "gtts",
            tld = tld,
            latency_ms = start_time.elapsed().as_millis(),
            chunk_count = chunks.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> GttsAdapter {
        GttsAdapter::new(reqwest::Client::new(), "com.br".to_string())
    }

    #[test]
    fn test_resolve_tld_recognized_values() {
        let adapter = adapter();
        assert_eq!(adapter.resolve_tld(Some("pt")), "pt");
        assert_eq!(adapter.resolve_tld(Some("com")), "com");
        assert_eq!(adapter.resolve_tld(Some("br")), "com.br");
    }

    #[test]
    fn test_resolve_tld_unknown_falls_back_to_default() {
        let adapter = adapter();
        assert_eq!(adapter.resolve_tld(Some("de")), "com.br");
        assert_eq!(adapter.resolve_tld(Some("Rachel")), "com.br");
        assert_eq!(adapter.resolve_tld(None), "com.br");
    }

    #[test]
    fn test_split_small_text_is_single_chunk() {
        let text = "O boletim de hoje é curto.";
        assert_eq!(GttsAdapter::split_into_chunks(text), vec![text.to_string()]);
    }

    #[test]
    fn test_split_respects_chunk_size() {
        let sentence = "Esta é uma frase do boletim. ";
        let text = sentence.repeat(30);
        let chunks = GttsAdapter::split_into_chunks(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                chunk.len() <= MAX_CHUNK_SIZE,
                "chunk of {} bytes exceeds limit",
                chunk.len()
            );
        }
    }

    #[test]
    fn test_split_preserves_words() {
        let sentence = "Mais uma notícia importante. ";
        let text = sentence.repeat(40);
        let chunks = GttsAdapter::split_into_chunks(&text);

        let reconstructed = chunks.join(" ");
        assert_eq!(
            text.split_whitespace().count(),
            reconstructed.split_whitespace().count()
        );
    }

    #[test]
    fn test_split_caps_oversized_sentence_mid_text() {
        // One long unbroken sentence followed by a short one: the long
        // sentence alone exceeds the cap and must be character-split even
        // though it is not at the tail of the text.
        let long_sentence = format!("{}.", "palavra ".repeat(30).trim_end());
        assert!(long_sentence.len() > MAX_CHUNK_SIZE);
        let text = format!("{long_sentence} Curta.");

        let chunks = GttsAdapter::split_into_chunks(&text);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(
                chunk.len() <= MAX_CHUNK_SIZE,
                "chunk of {} bytes exceeds the cap: {chunk:?}",
                chunk.len()
            );
        }

        let reconstructed = chunks.join(" ");
        assert_eq!(
            text.split_whitespace().count(),
            reconstructed.split_whitespace().count()
        );
    }

    #[test]
    fn test_split_handles_accented_text_without_boundaries() {
        // No sentence punctuation forces the character-level fallback, which
        // must not split inside a multi-byte character.
        let text = "çãéíõ".repeat(60);
        let chunks = GttsAdapter::split_into_chunks(&text);
        assert!(chunks.len() >= 2);
        assert_eq!(chunks.concat(), text);
    }
}
