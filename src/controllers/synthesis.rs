use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::synthesis::{SynthesisRequest, SynthesisService, TtsProvider},
    error::{AppError, AppResult},
    infrastructure::adapters::ProviderRegistry,
};

/// Request for POST /api/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<TtsProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    pub filename: String,
    pub is_audio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_used: Option<TtsProvider>,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    /// Locale TLDs accepted by the free tier.
    pub voices: Vec<&'static str>,
    pub providers: Vec<crate::domain::synthesis::ProviderCapability>,
}

pub struct SynthesisController {
    service: Arc<SynthesisService>,
    registry: Arc<ProviderRegistry>,
}

impl SynthesisController {
    pub fn new(service: Arc<SynthesisService>, registry: Arc<ProviderRegistry>) -> Self {
        Self { service, registry }
    }

    /// POST /api/synthesize - Convert bulletin text to speech
    pub async fn synthesize(
        State(controller): State<Arc<SynthesisController>>,
        Json(request): Json<SynthesizeRequest>,
    ) -> AppResult<Json<SynthesizeResponse>> {
        // Validate input
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        if request.text.chars().count() > 10_000 {
            return Err(AppError::PayloadTooLarge(
                "Text must be 10,000 characters or less".to_string(),
            ));
        }

        let result = controller
            .service
            .synthesize(SynthesisRequest {
                text: request.text,
                provider: request.provider.unwrap_or(TtsProvider::ElevenLabs),
                voice: request.voice,
            })
            .await
            .map_err(AppError::from)?;

        let filename = result
            .output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::Internal("output path has no file name".to_string()))?;

        Ok(Json(SynthesizeResponse {
            download_url: format!("/api/audio/{filename}"),
            filename,
            is_audio: result.is_audio,
            provider_used: result.provider_used,
        }))
    }

    /// GET /api/voices - List free-tier locales and available providers
    pub async fn list_voices(
        State(controller): State<Arc<SynthesisController>>,
    ) -> Json<VoicesResponse> {
        Json(VoicesResponse {
            voices: vec!["default", "br", "pt", "com"],
            providers: controller.registry.available(),
        })
    }
}
