use std::path::{Path, PathBuf};

use anyhow::Context;
use crop_store::{PipelineResult, PipelineResultBuilder};

use crate::{
    extract::{extract_text, DocumentKind},
    sources::{classify_path, is_url_manifest, InputKind, SourceLocator},
    Classifier, Fetcher, MediaNormalizer, Summarizer, Transcriber,
};

pub mod builder;

/// The core advisory media pipeline: locators in, one [`PipelineResult`]
/// out. Stages run as sequential barriers; per-item failures are logged and
/// the item is dropped from the aggregate.
#[derive(Debug)]
pub struct AdvisoryPipeline<F, N, T, S, C>
where
    F: Fetcher + Send + Sync + 'static,
    N: MediaNormalizer + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: Classifier + Send + Sync + 'static,
{
    workdir: PathBuf,
    fetcher: F,
    normalizer: N,
    transcriber: T,
    summarizer: S,
    classifier: C,
    language: String,
}

/// A resolved document awaiting text extraction.
#[derive(Debug)]
struct TextDocument {
    path: PathBuf,
    kind: DocumentKind,
}

impl<F, N, T, S, C> AdvisoryPipeline<F, N, T, S, C>
where
    F: Fetcher + Send + Sync + 'static,
    N: MediaNormalizer + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: Classifier + Send + Sync + 'static,
{
    /// Output token cap applied to the final cumulative reduction only.
    const CUMULATIVE_TOKEN_BUDGET: u32 = 255;

    /// Reads the optional `urls.txt` manifest from the working directory,
    /// one locator per line. The manifest is consumed once and never
    /// written back to.
    async fn read_url_manifest(&self) -> Vec<SourceLocator> {
        let manifest_path = self.workdir.join("urls.txt");
        match tokio::fs::read_to_string(&manifest_path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(SourceLocator::classify)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// FETCHING: resolves every locator into a local file. A locator that
    /// fails to resolve is skipped; the loop always runs to completion.
    #[tracing::instrument(skip_all)]
    async fn fetch_sources(&self, locators: &[SourceLocator]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for locator in locators {
            let resolved = match locator {
                SourceLocator::LocalPath(path) => {
                    if path.exists() {
                        Ok(path.clone())
                    } else {
                        tracing::warn!(path = %path.display(), "Local input does not exist");
                        continue;
                    }
                }
                SourceLocator::DirectUrl(url) => self
                    .fetcher
                    .fetch_url(url, &self.workdir)
                    .await
                    .map_err(anyhow::Error::from),
                SourceLocator::YoutubeUrl(url) => self
                    .fetcher
                    .fetch_youtube(url, true, &self.workdir)
                    .await
                    .map_err(anyhow::Error::from),
                SourceLocator::BucketKey { bucket, key } => self
                    .fetcher
                    .fetch_object(bucket, key, &self.workdir)
                    .await
                    .map_err(anyhow::Error::from),
            };

            match resolved {
                Ok(path) => files.push(path),
                Err(e) => {
                    tracing::warn!(error = %e, ?locator, "Failed to fetch source; skipping");
                }
            }
        }

        files
    }

    /// NORMALIZING: every video becomes an audio artifact, audio passes
    /// through. Documents and unrecognized files are split off here.
    #[tracing::instrument(skip_all)]
    async fn normalize_media(&self, files: &[PathBuf]) -> (Vec<PathBuf>, Vec<TextDocument>) {
        let mut audio_artifacts = Vec::new();
        let mut documents = Vec::new();

        for file in files {
            if is_url_manifest(file) {
                continue;
            }
            match classify_path(file) {
                InputKind::Audio => audio_artifacts.push(file.clone()),
                InputKind::Video => {
                    match self.normalizer.extract_audio(file, &self.workdir).await {
                        Ok(audio) => audio_artifacts.push(audio),
                        Err(e) => {
                            tracing::warn!(error = %e, path = %file.display(), "Failed to extract audio; skipping");
                        }
                    }
                }
                InputKind::Pdf => documents.push(TextDocument {
                    path: file.clone(),
                    kind: DocumentKind::Pdf,
                }),
                InputKind::PlainText => documents.push(TextDocument {
                    path: file.clone(),
                    kind: DocumentKind::PlainText,
                }),
                InputKind::Unknown => {
                    tracing::warn!(path = %file.display(), "Unrecognized input kind; skipping");
                }
            }
        }

        (audio_artifacts, documents)
    }

    /// TRANSCRIBING: each audio artifact becomes a transcript document. An
    /// empty transcript means "no content" and the artifact is dropped.
    #[tracing::instrument(skip_all)]
    async fn transcribe_media(&self, audio_artifacts: &[PathBuf]) -> Vec<TextDocument> {
        let mut transcripts = Vec::new();

        for audio in audio_artifacts {
            let response = match self.transcriber.transcribe(audio, &self.language).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = ?e, path = %audio.display(), "Failed to transcribe audio; skipping");
                    continue;
                }
            };

            if response.text.trim().is_empty() {
                tracing::info!(path = %audio.display(), "Empty transcript; skipping");
                continue;
            }

            let transcript_path = self.workdir.join(format!(
                "{}_transcript.txt",
                file_stem(audio)
            ));
            if let Err(e) = tokio::fs::write(&transcript_path, &response.text).await {
                tracing::warn!(error = %e, path = %transcript_path.display(), "Failed to write transcript; skipping");
                continue;
            }

            transcripts.push(TextDocument {
                path: transcript_path,
                kind: DocumentKind::PlainText,
            });
        }

        transcripts
    }

    /// EXTRACTING: each document becomes one lower-cased text blob, keyed by
    /// its filename. Malformed documents abort that file only.
    #[tracing::instrument(skip_all)]
    fn extract_documents(&self, documents: &[TextDocument]) -> Vec<(String, String)> {
        let mut blobs = Vec::new();

        for document in documents {
            match extract_text(&document.path, document.kind) {
                Ok(text) => blobs.push((file_name(&document.path), text)),
                Err(e) => {
                    tracing::warn!(error = %e, path = %document.path.display(), "Failed to extract text; skipping");
                }
            }
        }

        blobs
    }

    /// SUMMARIZING: one chunked summary per blob, persisted alongside the
    /// input as `<stem>_summary.txt`, plus the combined `summaries.txt`.
    #[tracing::instrument(skip_all)]
    async fn summarize_documents(&self, blobs: &[(String, String)]) -> Vec<(String, String)> {
        let mut summaries = Vec::new();

        for (filename, blob) in blobs {
            let response = match self.summarizer.summarize(blob).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = ?e, filename, "Failed to summarize document; skipping");
                    continue;
                }
            };

            let summary_path = self.workdir.join(format!(
                "{}_summary.txt",
                file_stem(Path::new(filename))
            ));
            if let Err(e) = tokio::fs::write(&summary_path, &response.summary).await {
                tracing::warn!(error = %e, path = %summary_path.display(), "Failed to write summary artifact");
            }

            summaries.push((filename.clone(), response.summary));
        }

        let combined = combined_summaries(&summaries);
        if let Err(e) = tokio::fs::write(self.workdir.join("summaries.txt"), &combined).await {
            tracing::warn!(error = %e, "Failed to write summaries.txt");
        }

        summaries
    }

    #[tracing::instrument(skip(self, inputs))]
    pub async fn run(&self, inputs: Vec<SourceLocator>) -> anyhow::Result<PipelineResult> {
        tokio::fs::create_dir_all(&self.workdir)
            .await
            .context("Failed to create working directory")?;

        let mut locators = inputs;
        locators.extend(self.read_url_manifest().await);
        tracing::info!(count = locators.len(), "Processing sources");

        let files = self.fetch_sources(&locators).await;
        let (audio_artifacts, mut documents) = self.normalize_media(&files).await;

        let transcripts = self.transcribe_media(&audio_artifacts).await;
        documents.extend(transcripts);

        let blobs = self.extract_documents(&documents);
        let summaries = self.summarize_documents(&blobs).await;

        // CLASSIFYING
        let mut result = PipelineResultBuilder::new();
        for (filename, summary) in &summaries {
            match self.classifier.classify(summary).await {
                Ok(labels) => result.record(filename.clone(), labels),
                Err(e) => {
                    tracing::warn!(error = ?e, filename, "Failed to classify summary");
                    result.record(filename.clone(), Vec::new());
                }
            }
        }

        // AGGREGATING
        let cumulative_summary = if summaries.is_empty() {
            String::new()
        } else {
            let combined = combined_summaries(&summaries);
            self.summarizer
                .summarize_cumulative(&combined, Self::CUMULATIVE_TOKEN_BUDGET)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to build cumulative summary: {e:?}"))?
                .summary
        };

        Ok(result.finalize(cumulative_summary))
    }
}

/// The `summaries.txt` artifact and the cumulative-pass input share this
/// exact shape: one `filename:\nsummary\n` entry per file, blank-line
/// separated, in summarization order.
fn combined_summaries(summaries: &[(String, String)]) -> String {
    summaries
        .iter()
        .map(|(filename, summary)| format!("{filename}:\n{summary}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
