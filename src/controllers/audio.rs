use axum::{
    body::Body,
    extract::{Path as PathParam, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct AudioFileEntry {
    pub name: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AudioListResponse {
    pub files: Vec<AudioFileEntry>,
    pub count: usize,
}

/// Serves the flat output directory: one file per completed request, the
/// directory listing being the only inventory mechanism.
pub struct AudioController {
    audio_dir: PathBuf,
}

impl AudioController {
    pub fn new(audio_dir: PathBuf) -> Self {
        Self { audio_dir }
    }

    /// GET /api/audio - List generated bulletins, newest first
    pub async fn list(
        State(controller): State<Arc<AudioController>>,
    ) -> AppResult<Json<AudioListResponse>> {
        let mut files = Vec::new();

        let mut entries = match tokio::fs::read_dir(&controller.audio_dir).await {
            Ok(entries) => entries,
            // Nothing generated yet
            Err(_) => {
                return Ok(Json(AudioListResponse {
                    files,
                    count: 0,
                }))
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let extension = path.extension().and_then(|ext| ext.to_str());
            if !matches!(extension, Some("mp3") | Some("txt")) {
                continue;
            }

            let metadata = entry
                .metadata()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            files.push(AudioFileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
                modified,
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(Json(AudioListResponse {
            count: files.len(),
            files,
        }))
    }

    /// GET /api/audio/:filename - Download a generated bulletin
    pub async fn download(
        State(controller): State<Arc<AudioController>>,
        PathParam(filename): PathParam<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // Strip any path components so the handler cannot escape the
        // output directory.
        let name = Path::new(&filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::NotFound(filename.clone()))?;

        let path = controller.audio_dir.join(&name);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(name.clone()))?;

        let content_type = if name.ends_with(".mp3") {
            "audio/mpeg"
        } else {
            "text/plain; charset=utf-8"
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type.parse().unwrap());
        if let Ok(disposition) = format!("attachment; filename=\"{name}\"").parse() {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }
}
