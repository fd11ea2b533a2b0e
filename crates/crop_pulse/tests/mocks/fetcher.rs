use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crop_pulse::{FetchError, Fetcher};

/// Fetcher double: locators map to (filename, content) pairs that get
/// written into the destination directory on fetch.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pub files: Vec<(String, String, String)>,
    pub fail_for: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `locator` to resolve to a file named `filename` holding
    /// `content`. Bucket locators use the `bucket/key` form.
    pub fn with_file(mut self, locator: &str, filename: &str, content: &str) -> Self {
        self.files
            .push((locator.to_string(), filename.to_string(), content.to_string()));
        self
    }

    pub fn failing_for(mut self, locator: &str) -> Self {
        self.fail_for.push(locator.to_string());
        self
    }

    fn resolve(&self, locator: &str, dest_dir: &Path) -> Result<PathBuf, FetchError> {
        self.calls.lock().unwrap().push(locator.to_string());

        if self.fail_for.iter().any(|l| l == locator) {
            return Err(FetchError::Download(format!("mock failure for {locator}")));
        }

        let (_, filename, content) = self
            .files
            .iter()
            .find(|(l, _, _)| l == locator)
            .ok_or_else(|| FetchError::Download(format!("no mock file for {locator}")))?;

        let dest = dest_dir.join(filename);
        std::fs::write(&dest, content).map_err(FetchError::Io)?;
        Ok(dest)
    }
}

impl Fetcher for MockFetcher {
    async fn fetch_url(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, FetchError> {
        self.resolve(url, dest_dir)
    }

    async fn fetch_youtube(
        &self,
        url: &str,
        _audio_only: bool,
        dest_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        self.resolve(url, dest_dir)
    }

    async fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        self.resolve(&format!("{bucket}/{key}"), dest_dir)
    }
}
