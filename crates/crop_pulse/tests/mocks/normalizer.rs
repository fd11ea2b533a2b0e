use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crop_pulse::{MediaError, MediaNormalizer};

#[derive(Clone)]
pub struct MockNormalizer {
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl Default for MockNormalizer {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockNormalizer {
    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl MediaNormalizer for MockNormalizer {
    async fn extract_audio(
        &self,
        video_path: &Path,
        dest_dir: &Path,
    ) -> Result<PathBuf, MediaError> {
        self.calls.lock().unwrap().push(video_path.to_path_buf());

        if let Some(ref msg) = self.fail_with {
            return Err(MediaError::Ffmpeg {
                path: video_path.to_path_buf(),
                message: msg.clone(),
            });
        }

        let stem = video_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        let dest = dest_dir.join(format!("{stem}.mp3"));
        std::fs::write(&dest, b"").map_err(MediaError::Io)?;
        Ok(dest)
    }
}
