//! Input classification: locator strings to typed sources, file paths to
//! typed inputs. Both mappings are total; anything unrecognized lands in an
//! explicit catch-all instead of falling through.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

static YOUTUBE_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(youtube\.com|youtu\.be)").expect("valid regex"));

/// A single resource to be resolved into a local file by the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    LocalPath(PathBuf),
    DirectUrl(String),
    YoutubeUrl(String),
    BucketKey { bucket: String, key: String },
}

impl SourceLocator {
    /// Classifies one raw locator line, e.g. from a `urls.txt` manifest.
    pub fn classify(raw: &str) -> SourceLocator {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            if YOUTUBE_HOST_RE.is_match(raw) {
                SourceLocator::YoutubeUrl(raw.to_string())
            } else {
                SourceLocator::DirectUrl(raw.to_string())
            }
        } else {
            SourceLocator::LocalPath(PathBuf::from(raw))
        }
    }
}

/// Kind of a resolved local file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Audio,
    Video,
    Pdf,
    PlainText,
    Unknown,
}

const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

pub fn classify_path(path: &Path) -> InputKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        InputKind::Audio
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        InputKind::Video
    } else if ext == "pdf" {
        InputKind::Pdf
    } else if ext == "txt" {
        InputKind::PlainText
    } else {
        InputKind::Unknown
    }
}

/// The locator manifest file consumed at the start of a run. It is itself
/// never processed as a document.
pub fn is_url_manifest(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("urls.txt") | Some("url.txt")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_youtube_urls() {
        assert_eq!(
            SourceLocator::classify("https://www.youtube.com/watch?v=abc123"),
            SourceLocator::YoutubeUrl("https://www.youtube.com/watch?v=abc123".into())
        );
        assert_eq!(
            SourceLocator::classify("https://youtu.be/abc123"),
            SourceLocator::YoutubeUrl("https://youtu.be/abc123".into())
        );
    }

    #[test]
    fn classifies_direct_urls() {
        assert_eq!(
            SourceLocator::classify("https://example.com/guide.pdf?sig=xyz"),
            SourceLocator::DirectUrl("https://example.com/guide.pdf?sig=xyz".into())
        );
    }

    #[test]
    fn anything_else_is_a_local_path() {
        assert_eq!(
            SourceLocator::classify("  /data/uploads/notes.txt "),
            SourceLocator::LocalPath(PathBuf::from("/data/uploads/notes.txt"))
        );
    }

    #[test]
    fn classify_path_is_total() {
        assert_eq!(classify_path(Path::new("a.MP3")), InputKind::Audio);
        assert_eq!(classify_path(Path::new("b.mkv")), InputKind::Video);
        assert_eq!(classify_path(Path::new("c.pdf")), InputKind::Pdf);
        assert_eq!(classify_path(Path::new("d.txt")), InputKind::PlainText);
        assert_eq!(classify_path(Path::new("e.docx")), InputKind::Unknown);
        assert_eq!(classify_path(Path::new("noextension")), InputKind::Unknown);
    }

    #[test]
    fn url_manifest_is_recognized() {
        assert!(is_url_manifest(Path::new("/work/urls.txt")));
        assert!(is_url_manifest(Path::new("url.txt")));
        assert!(!is_url_manifest(Path::new("summaries.txt")));
    }
}
