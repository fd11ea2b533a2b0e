//! Locator resolution: remote resources to files in the working directory.

use std::{
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_retry_after::RetryAfterMiddleware;
use tokio::process::Command;
use url::Url;

use crate::error::FetchError;

/// The download collaborators of the pipeline. Each operation resolves one
/// locator into a local file; failures surface as [`FetchError`] and the
/// orchestrator decides the skip policy.
pub trait Fetcher {
    fn fetch_url(
        &self,
        url: &str,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;

    fn fetch_youtube(
        &self,
        url: &str,
        audio_only: bool,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;

    fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;
}

/// Production fetcher: retrying HTTP client for direct links and bucket
/// objects, `yt-dlp` subprocess for YouTube.
pub struct MediaFetcher {
    http: ClientWithMiddleware,
    object_store_endpoint: Option<String>,
}

impl MediaFetcher {
    pub fn new(object_store_endpoint: Option<String>) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let http = ClientBuilder::new(reqwest::Client::new())
            .with(RetryAfterMiddleware::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        MediaFetcher {
            http,
            object_store_endpoint,
        }
    }

    async fn download_to(&self, url: &str, dest: &Path) -> Result<PathBuf, FetchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, url, "Failed to make http request"))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(dest.to_path_buf())
    }
}

impl Fetcher for MediaFetcher {
    async fn fetch_url(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, FetchError> {
        let filename = filename_from_url(url)?;
        let dest = dest_dir.join(filename);
        self.download_to(url, &dest).await
    }

    async fn fetch_youtube(
        &self,
        url: &str,
        audio_only: bool,
        dest_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let template = dest_dir.join("%(title)s.%(ext)s");

        let mut cmd = Command::new("yt-dlp");
        if audio_only {
            cmd.arg("--format")
                .arg("bestaudio/best")
                .arg("--extract-audio")
                .arg("--audio-format")
                .arg("mp3")
                .arg("--audio-quality")
                .arg("0");
        } else {
            cmd.arg("--format").arg("best");
        }

        let result = cmd
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--no-simulate")
            // resolves the final on-disk filename for us
            .arg("--print")
            .arg("after_move:filepath")
            .arg("--output")
            .arg(&template)
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::ToolNotFound("yt-dlp".into()));
            }
            Err(e) => return Err(FetchError::Download(format!("yt-dlp execution failed: {e}"))),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::Download(format!("yt-dlp failed: {stderr}")));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .next_back()
            .map(PathBuf::from)
            .ok_or_else(|| {
                FetchError::Download("yt-dlp did not report a downloaded file".into())
            })?;

        if !path.exists() {
            return Err(FetchError::Download(format!(
                "yt-dlp did not produce expected file: {}",
                path.display()
            )));
        }
        Ok(path)
    }

    async fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let endpoint = self
            .object_store_endpoint
            .as_deref()
            .ok_or_else(|| FetchError::NoObjectStore {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        let filename = Path::new(key)
            .file_name()
            .ok_or_else(|| FetchError::InvalidLocator(format!("{bucket}/{key}")))?;
        let dest = dest_dir.join(filename);

        let url = format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'));
        self.download_to(&url, &dest).await
    }
}

/// Derives the local filename for a direct URL: the final path segment with
/// the query string stripped.
fn filename_from_url(url: &str) -> Result<String, FetchError> {
    let parsed =
        Url::parse(url).map_err(|_| FetchError::InvalidLocator(url.to_string()))?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back().map(str::to_string))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FetchError::InvalidLocator(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_strips_query_string() {
        assert_eq!(
            filename_from_url("https://example.com/docs/guide.pdf?sig=abc&x=1").unwrap(),
            "guide.pdf"
        );
    }

    #[test]
    fn filename_is_last_path_segment() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/a/b/c/advisory.txt").unwrap(),
            "advisory.txt"
        );
    }

    #[test]
    fn url_without_filename_is_invalid() {
        assert!(filename_from_url("https://example.com/").is_err());
        assert!(filename_from_url("not a url").is_err());
    }

    #[tokio::test]
    async fn object_fetch_without_endpoint_fails() {
        let fetcher = MediaFetcher::new(None);
        let err = fetcher
            .fetch_object("advisories", "kharif/wheat.pdf", Path::new("/tmp"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NoObjectStore { .. }));
    }
}
