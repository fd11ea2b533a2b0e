//! Media normalization: every media input becomes one audio artifact.

use std::{
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;

use crate::error::MediaError;

/// Extracts the audio track of a video file into the target audio container.
/// Audio inputs pass through at the orchestrator level and never reach this
/// seam.
pub trait MediaNormalizer {
    fn extract_audio(
        &self,
        video_path: &Path,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, MediaError>> + Send;
}

/// Production normalizer shelling out to `ffmpeg`, re-encoding the audio
/// track to mp3 at `<stem>.mp3`.
#[derive(Debug, Clone, Default)]
pub struct FfmpegNormalizer;

impl MediaNormalizer for FfmpegNormalizer {
    async fn extract_audio(
        &self,
        video_path: &Path,
        dest_dir: &Path,
    ) -> Result<PathBuf, MediaError> {
        let stem = video_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        let dest = dest_dir.join(format!("{stem}.mp3"));

        let result = Command::new("ffmpeg")
            .arg("-i")
            .arg(video_path)
            .arg("-vn")
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg("-qscale:a")
            .arg("2")
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg(&dest)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(dest),
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                Err(MediaError::Ffmpeg {
                    path: video_path.to_path_buf(),
                    message: stderr.into_owned(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::ToolNotFound("ffmpeg".into()))
            }
            Err(e) => Err(MediaError::Io(e)),
        }
    }
}
