//! Thin HTTP surface: endpoints enqueue pipeline runs as background jobs
//! and poll their status. The pipeline itself stays synchronous; each run
//! owns a working directory keyed by its job id.

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use crop_store::{InMemoryJobStore, JobStatus, JobStore, PipelineResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::{
    openai::OpenAiClient, sources::SourceLocator, AdvisoryPipelineBuilder, FfmpegNormalizer,
    MediaFetcher,
};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub openai_api_key: String,
    pub workdir: PathBuf,
    pub chunk_words: usize,
    pub language: String,
    pub object_store_endpoint: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub jobs: InMemoryJobStore,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        AppState {
            jobs: InMemoryJobStore::new(),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/process", post(process_files))
        .route("/process_s3_files", post(process_bucket_files))
        .route("/task_status/{task_id}", get(task_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub file_paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessBucketRequest {
    pub bucket_name: String,
    pub file_keys: Vec<String>,
}

#[derive(Serialize)]
struct SubmitResponse {
    task_id: String,
    status: &'static str,
}

#[derive(Serialize)]
struct TaskStatusResponse {
    task_id: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<PipelineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[tracing::instrument(skip_all)]
async fn process_files(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Response {
    let locators = request
        .file_paths
        .iter()
        .map(|raw| SourceLocator::classify(raw))
        .collect();
    accept_run(&state, locators).await
}

#[tracing::instrument(skip_all)]
async fn process_bucket_files(
    State(state): State<AppState>,
    Json(request): Json<ProcessBucketRequest>,
) -> Response {
    let locators = request
        .file_keys
        .into_iter()
        .map(|key| SourceLocator::BucketKey {
            bucket: request.bucket_name.clone(),
            key,
        })
        .collect();
    accept_run(&state, locators).await
}

/// Multipart upload: each part is saved into a fresh per-batch uploads
/// directory and the saved paths are enqueued as one run. Concurrent
/// batches carrying the same filename never share a path.
#[tracing::instrument(skip_all)]
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let uploads_dir = batch_uploads_dir(&state.config.workdir);
    if let Err(e) = tokio::fs::create_dir_all(&uploads_dir).await {
        tracing::error!(error = %e, "Failed to create uploads directory");
        return internal_error(e.to_string());
    }

    let mut locators = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Malformed multipart request: {e}")),
        };

        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        // strip any client-supplied directory components
        let Some(filename) = std::path::Path::new(&original_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return bad_request(format!("Failed to read uploaded file: {e}")),
        };

        let dest = uploads_dir.join(&filename);
        if let Err(e) = tokio::fs::write(&dest, &bytes).await {
            tracing::error!(error = %e, path = %dest.display(), "Failed to persist upload");
            return internal_error(e.to_string());
        }
        locators.push(SourceLocator::LocalPath(dest));
    }

    if locators.is_empty() {
        return bad_request("No files part in the request".into());
    }

    accept_run(&state, locators).await
}

#[tracing::instrument(skip_all, fields(task_id))]
async fn task_status(State(state): State<AppState>, Path(task_id): Path<String>) -> Response {
    let id = match Uuid::parse_str(&task_id) {
        Ok(id) => id,
        Err(_) => return bad_request(format!("Invalid task ID: {task_id}")),
    };

    match state.jobs.get_job(id).await {
        Ok(Some(job)) => {
            let state = job.state().as_str();
            let (result, error) = match job.status {
                JobStatus::Success(result) => (Some(result), None),
                JobStatus::Failure(message) => (None, Some(message)),
                _ => (None, None),
            };
            (
                StatusCode::OK,
                Json(TaskStatusResponse {
                    task_id,
                    state,
                    result,
                    error,
                }),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Task not found: {task_id}"),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch task status");
            internal_error(e.to_string())
        }
    }
}

/// Registers a job and spawns its pipeline run. Responds 202 immediately.
async fn accept_run(state: &AppState, locators: Vec<SourceLocator>) -> Response {
    let job = match state.jobs.create_job().await {
        Ok(job) => job,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register job");
            return internal_error(e.to_string());
        }
    };

    let jobs = state.jobs.clone();
    let config = state.config.clone();
    let job_id = job.id;

    tokio::spawn(async move {
        if let Err(e) = jobs.update_status(job_id, JobStatus::Running).await {
            tracing::error!(error = %e, job_id = %job_id, "Failed to mark job running");
        }

        let status = match run_pipeline(&config, job_id, locators).await {
            Ok(result) => JobStatus::Success(result),
            Err(e) => {
                tracing::error!(error = ?e, job_id = %job_id, "Pipeline run failed");
                JobStatus::Failure(format!("{e:#}"))
            }
        };

        if let Err(e) = jobs.update_status(job_id, status).await {
            tracing::error!(error = %e, job_id = %job_id, "Failed to record job outcome");
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            task_id: job.id.to_string(),
            status: "Processing started",
        }),
    )
        .into_response()
}

async fn run_pipeline(
    config: &ServiceConfig,
    job_id: Uuid,
    locators: Vec<SourceLocator>,
) -> anyhow::Result<PipelineResult> {
    // each run gets its own working directory under the service workdir
    let workdir = config.workdir.join(job_id.to_string());

    // one client serves transcription, summarization and classification
    let openai =
        OpenAiClient::new(&config.openai_api_key).with_chunk_words(config.chunk_words);

    let pipeline = AdvisoryPipelineBuilder::new(&workdir)
        .fetcher(MediaFetcher::new(config.object_store_endpoint.clone()))
        .normalizer(FfmpegNormalizer)
        .transcriber(openai.clone())
        .summarizer(openai.clone())
        .classifier(openai)
        .language(&config.language)
        .build();

    pipeline.run(locators).await
}

fn batch_uploads_dir(workdir: &std::path::Path) -> PathBuf {
    workdir.join("uploads").join(Uuid::new_v4().to_string())
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
