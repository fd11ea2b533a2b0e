use std::{fmt::Debug, future::Future, path::Path};

use serde::Deserialize;

/// Speech-to-text collaborator. The language hint is fixed per run; no
/// auto-detection happens in the production path.
pub trait Transcriber {
    const TRANSCRIBER_MODEL: &'static str;

    type Error: Debug;

    fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

#[derive(Debug, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
}
