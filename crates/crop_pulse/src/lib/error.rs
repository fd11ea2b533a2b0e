use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),
    #[error("External tool not found: {0}")]
    ToolNotFound(String),
    #[error("Download failed: {0}")]
    Download(String),
    #[error("Object store endpoint not configured; cannot fetch {bucket}/{key}")]
    NoObjectStore { bucket: String, key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("External tool not found: {0}")]
    ToolNotFound(String),
    #[error("FFmpeg failed on {path}: {message}")]
    Ffmpeg { path: PathBuf, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed for {path}: {message}")]
    Pdf { path: PathBuf, message: String },
    #[error("File is not valid UTF-8: {0}")]
    Encoding(PathBuf),
}
