use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crop_pulse::{TranscribeResponse, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub text: String,
    pub fail_with: Option<String>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            text: String::new(),
            fail_with: Some(msg.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Transcriber for MockTranscriber {
    const TRANSCRIBER_MODEL: &'static str = "mock-transcriber";
    type Error = String;

    async fn transcribe(
        &self,
        audio_path: &Path,
        _language: &str,
    ) -> Result<TranscribeResponse, Self::Error> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());

        if let Some(ref msg) = self.fail_with {
            return Err(msg.clone());
        }

        Ok(TranscribeResponse {
            text: self.text.clone(),
        })
    }
}
