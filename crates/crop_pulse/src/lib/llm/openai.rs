use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Deserialize;

use crate::{
    chunker::split_words,
    llm::classifier::{drop_none_when_specific, parse_label_response, Classifier, LabelSet},
    Summarizer, SummaryResponse, TranscribeResponse, Transcriber,
};

/// Client for the hosted completion and transcription endpoints. Constructed
/// once at process start and injected into the pipeline; reused across all
/// calls within a run. Deliberately carries no retry policy of its own.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    chunk_words: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl OpenAiClient {
    const SUMMARIZE_SYSTEM_PROMPT: &str = include_str!("./prompts/summarize_system.txt");
    const CLASSIFY_SYSTEM_PROMPT: &str = include_str!("./prompts/classify_system.txt");
    const CLASSIFY_USER_TEMPLATE: &str = include_str!("./prompts/classify_user.txt");

    pub const DEFAULT_CHUNK_WORDS: usize = 1500;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
            chunk_words: Self::DEFAULT_CHUNK_WORDS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_chunk_words(mut self, chunk_words: usize) -> Self {
        self.chunk_words = chunk_words;
        self
    }

    pub async fn send_transcribe_request(
        &self,
        file: impl Into<PathBuf>,
        model_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<TranscribeResponse, OpenAiError> {
        let audio_path = file.into();
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".into());

        let bytes = tokio::fs::read(&audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;

        let form = reqwest::multipart::Form::new()
            .text("model", model_name.into())
            .text("language", language.into())
            .text("response_format", "json")
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, message });
        }

        Ok(resp.json::<TranscribeResponse>().await?)
    }

    pub async fn send_completion_request(
        &self,
        model_name: impl Into<String>,
        system_prompt: &str,
        user_content: impl Into<String>,
        max_tokens: Option<u32>,
    ) -> Result<CompletionResponse, OpenAiError> {
        let mut body = serde_json::json!({
            "model": model_name.into(),
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });
        if let Some(max_tokens) = max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    fn into_text(self) -> Result<String, OpenAiError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAiError::Api {
                status: 0,
                message: "No content in response".into(),
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl Transcriber for OpenAiClient {
    const TRANSCRIBER_MODEL: &'static str = "whisper-1";
    type Error = OpenAiError;

    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<TranscribeResponse, Self::Error> {
        self.send_transcribe_request(audio_path, Self::TRANSCRIBER_MODEL, language)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))
    }
}

impl Summarizer for OpenAiClient {
    const SUMMARIZER_MODEL: &'static str = "gpt-3.5-turbo";
    type Error = OpenAiError;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        let chunks = split_words(content, self.chunk_words);
        let mut summary = String::new();

        // A failed chunk is dropped from the summary; partial summaries are
        // valid output.
        for (index, chunk) in chunks.iter().enumerate() {
            let response = self
                .send_completion_request(
                    Self::SUMMARIZER_MODEL,
                    Self::SUMMARIZE_SYSTEM_PROMPT,
                    format!("Summarize the following text: {chunk}"),
                    None,
                )
                .await;

            match response.and_then(CompletionResponse::into_text) {
                Ok(text) => {
                    summary.push_str(&text);
                    summary.push('\n');
                }
                Err(e) => {
                    tracing::warn!(error = %e, chunk = index, "Failed to summarize chunk");
                }
            }
        }

        Ok(SummaryResponse { summary })
    }

    async fn summarize_cumulative(
        &self,
        content: &str,
        max_tokens: u32,
    ) -> Result<SummaryResponse, Self::Error> {
        let response = self
            .send_completion_request(
                Self::SUMMARIZER_MODEL,
                Self::SUMMARIZE_SYSTEM_PROMPT,
                format!("Generate a cumulative summary for the following summaries:\n\n{content}"),
                Some(max_tokens),
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = response.into_text()?;
        Ok(SummaryResponse { summary })
    }
}

impl Classifier for OpenAiClient {
    const CLASSIFIER_MODEL: &'static str = "gpt-3.5-turbo";
    type Error = OpenAiError;

    async fn classify(&self, summary: &str) -> Result<LabelSet, Self::Error> {
        let user_content = Self::CLASSIFY_USER_TEMPLATE.replace("{summary}", summary);

        let response = self
            .send_completion_request(
                Self::CLASSIFIER_MODEL,
                Self::CLASSIFY_SYSTEM_PROMPT,
                user_content,
                None,
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to classify summary"))?;

        let raw = response.into_text()?;
        Ok(drop_none_when_specific(parse_label_response(raw.trim())))
    }
}
