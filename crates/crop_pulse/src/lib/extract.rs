//! Document text extraction. Output is always a single lower-cased blob.

use std::path::Path;

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

/// Extracts the full lower-cased text of one document.
///
/// PDFs yield their pages in order as one blob. Plain text must be valid
/// UTF-8. Malformed input propagates an error, to be handled at the loop
/// level by the caller.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Pdf => extract_pdf(path),
        DocumentKind::PlainText => extract_plain(path),
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(text.to_lowercase())
}

fn extract_plain(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let text =
        String::from_utf8(bytes).map_err(|_| ExtractError::Encoding(path.to_path_buf()))?;
    Ok(text.to_lowercase())
}
