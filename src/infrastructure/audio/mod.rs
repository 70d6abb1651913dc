use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Playback-speed adjustment failed. Never fatal: the router keeps the
/// unmodified audio instead.
#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    #[error("could not spawn ffmpeg: {0}")]
    Spawn(std::io::Error),
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Speeds up synthesized audio with ffmpeg's `atempo` filter.
///
/// Only the gTTS output goes through here; its natural speech rate is
/// slower than the hosted neural voices.
pub struct PostProcessor {
    factor: f32,
}

impl PostProcessor {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    /// Whether the configured factor actually changes playback.
    pub fn is_active(&self) -> bool {
        (self.factor - 1.0).abs() > f32::EPSILON
    }

    /// Re-encode `input` at the configured speed into `output`.
    pub async fn speed_up(&self, input: &Path, output: &Path) -> Result<PathBuf, PostProcessError> {
        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            factor = self.factor,
            "Adjusting playback speed with ffmpeg"
        );

        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-filter:a")
            .arg(format!("atempo={}", self.factor))
            .arg("-vn")
            .arg(output)
            .output()
            .await
            .map_err(PostProcessError::Spawn)?;

        if !result.status.success() {
            return Err(PostProcessError::Failed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        Ok(output.to_path_buf())
    }
}
